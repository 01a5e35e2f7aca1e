use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::price_bar::PriceBar;
use crate::common::{
    cycle_error::{CycleError, CycleResult, ErrCode},
    time::Time,
};

/// Time-ordered bars, indexed 0..N-1 without gaps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Takes bars in order; indices must be 0..N-1 and times, when
    /// present, strictly increasing.
    pub fn new(bars: Vec<PriceBar>) -> CycleResult<Self> {
        for (pos, bar) in bars.iter().enumerate() {
            if bar.index != pos {
                return Err(CycleError::new(
                    format!("bar at position {} has index {}", pos, bar.index),
                    ErrCode::KlNotMonotonous,
                ));
            }
        }
        for pair in bars.windows(2) {
            if let (Some(a), Some(b)) = (&pair[0].time, &pair[1].time) {
                if b <= a {
                    return Err(CycleError::new(
                        format!("bar {} time {} is not after {}", pair[1].index, b, a),
                        ErrCode::KlNotMonotonous,
                    ));
                }
            }
        }
        Ok(Self { bars })
    }

    /// Build from raw (time, open, high, low, close) rows, assigning indices
    pub fn from_rows<I>(rows: I, autofix: bool) -> CycleResult<Self>
    where
        I: IntoIterator<Item = (Option<Time>, f64, f64, f64, f64)>,
    {
        let bars = rows
            .into_iter()
            .enumerate()
            .map(|(i, (t, o, h, l, c))| PriceBar::new(i, t, o, h, l, c, autofix))
            .collect::<CycleResult<Vec<_>>>()?;
        Self::new(bars)
    }

    /// Flat bars (open = high = low = close), handy when only closes matter
    pub fn from_closes(closes: &[f64]) -> CycleResult<Self> {
        Self::from_rows(closes.iter().map(|&c| (None, c, c, c, c)), false)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PriceBar> {
        self.bars.get(index)
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceBar> {
        self.bars.iter()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }

    pub fn first_time(&self) -> Option<Time> {
        self.bars.first().and_then(|b| b.time)
    }

    pub fn last_time(&self) -> Option<Time> {
        self.bars.last().and_then(|b| b.time)
    }
}

impl Index<usize> for PriceSeries {
    type Output = PriceBar;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bars[index]
    }
}
