use serde::{Deserialize, Serialize};

use crate::common::{
    cycle_error::{CycleError, CycleResult, ErrCode},
    time::Time,
    utils::is_valid_price,
};

/// One OHLC bar of the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub index: usize,
    pub time: Option<Time>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    pub fn new(
        index: usize,
        time: Option<Time>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        autofix: bool,
    ) -> CycleResult<Self> {
        let mut bar = Self {
            index,
            time,
            open,
            high,
            low,
            close,
        };
        bar.check(autofix)?;
        Ok(bar)
    }

    /// Mean of open/high/low/close, the reference price of a cross
    pub fn ohlc_average(&self) -> f64 {
        (self.open + self.high + self.low + self.close) / 4.0
    }

    fn label(&self) -> String {
        match &self.time {
            Some(t) => format!("bar {} ({})", self.index, t),
            None => format!("bar {}", self.index),
        }
    }

    fn check(&mut self, autofix: bool) -> CycleResult<()> {
        for (name, v) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !is_valid_price(v) {
                return Err(CycleError::new(
                    format!("{} {}={} is not a positive finite price", self.label(), name, v),
                    ErrCode::KlDataInvalid,
                ));
            }
        }

        let min_price = self.low.min(self.open).min(self.high).min(self.close);
        let max_price = self.low.max(self.open).max(self.high).max(self.close);

        if self.low > min_price {
            if autofix {
                self.low = min_price;
            } else {
                return Err(CycleError::new(
                    format!(
                        "{} low price={} is not min of [low={}, open={}, high={}, close={}]",
                        self.label(), self.low, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }

        if self.high < max_price {
            if autofix {
                self.high = max_price;
            } else {
                return Err(CycleError::new(
                    format!(
                        "{} high price={} is not max of [low={}, open={}, high={}, close={}]",
                        self.label(), self.high, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }
        Ok(())
    }
}
