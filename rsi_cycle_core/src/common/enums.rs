use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which threshold band the RSI crossed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossKind {
    /// Crossed up through the overbought level
    #[strum(serialize = "overbought")]
    Overbought,
    /// Crossed down through the oversold level
    #[strum(serialize = "oversold")]
    Oversold,
}

/// Net outcome of a cycle: closing price above or below the cross price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleSign {
    #[strum(serialize = "positive")]
    Positive,
    #[strum(serialize = "negative")]
    Negative,
}

impl CycleSign {
    pub fn is_positive(&self) -> bool {
        matches!(self, CycleSign::Positive)
    }
}

/// Price columns of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum DataField {
    #[strum(serialize = "time")]
    FieldTime,
    #[strum(serialize = "open")]
    FieldOpen,
    #[strum(serialize = "high")]
    FieldHigh,
    #[strum(serialize = "low")]
    FieldLow,
    #[strum(serialize = "close")]
    FieldClose,
}
