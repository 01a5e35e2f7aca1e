use serde::{Deserialize, Serialize};

use crate::common::enums::{CrossKind, CycleSign};

/// Bars from one cross (inclusive) up to the bar before the next cross
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub start_index: usize,
    pub end_index: usize,
    pub cross_kind: CrossKind,
    pub cross_rsi: f64,
}

impl Cycle {
    /// Number of bars, both ends included
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }
}

/// A cycle plus the prices that decided its sign
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedCycle {
    #[serde(flatten)]
    pub cycle: Cycle,
    pub sign: CycleSign,
    /// OHLC mean of the bar at `start_index`
    pub cross_price: f64,
    /// Close of the bar at `end_index`
    pub exit_price: f64,
}

impl ClassifiedCycle {
    pub fn start_index(&self) -> usize {
        self.cycle.start_index
    }

    pub fn end_index(&self) -> usize {
        self.cycle.end_index
    }

    pub fn len(&self) -> usize {
        self.cycle.len()
    }

    pub fn is_positive(&self) -> bool {
        self.sign.is_positive()
    }
}
