use serde::{Deserialize, Serialize};

use crate::common::enums::CrossKind;

/// RSI crossing one of the threshold levels between two consecutive bars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossEvent {
    /// Bar at which the RSI is first beyond the level
    pub index: usize,
    pub kind: CrossKind,
    /// RSI at `index`
    pub rsi_value: f64,
}

impl CrossEvent {
    pub fn new(index: usize, kind: CrossKind, rsi_value: f64) -> Self {
        Self {
            index,
            kind,
            rsi_value,
        }
    }

    pub fn is_overbought(&self) -> bool {
        self.kind == CrossKind::Overbought
    }

    pub fn is_oversold(&self) -> bool {
        self.kind == CrossKind::Oversold
    }
}
