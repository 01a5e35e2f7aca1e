use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::cycle_error::{CycleError, CycleResult, ErrCode};
use crate::kline::price_series::PriceSeries;

/// Simple (unsmoothed) RSI over a trailing window of close-to-close deltas.
///
/// Values are fed one price at a time. The first value comes out once
/// `period` deltas are available, i.e. on the `period + 1`-th price.
/// A window with neither gains nor losses has no defined RSI and yields
/// `None`.
#[derive(Debug, Clone)]
pub struct RsiModel {
    period: usize,
    last_price: Option<f64>,
    gains: VecDeque<f64>,
    losses: VecDeque<f64>,
}

impl RsiModel {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            last_price: None,
            gains: VecDeque::with_capacity(period + 1),
            losses: VecDeque::with_capacity(period + 1),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn add(&mut self, price: f64) -> Option<f64> {
        let last_price = self.last_price.replace(price)?;
        let change = price - last_price;

        if change > 0.0 {
            self.gains.push_back(change);
            self.losses.push_back(0.0);
        } else {
            self.gains.push_back(0.0);
            self.losses.push_back(-change);
        }

        if self.gains.len() > self.period {
            self.gains.pop_front();
            self.losses.pop_front();
        }

        if self.gains.len() < self.period {
            return None;
        }

        let avg_gain = self.gains.iter().sum::<f64>() / self.period as f64;
        let avg_loss = self.losses.iter().sum::<f64>() / self.period as f64;
        rsi_from_averages(avg_gain, avg_loss)
    }
}

/// RSI from the window averages. 0/0 is undefined.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);
    rsi.is_finite().then(|| rsi.clamp(0.0, 100.0))
}

/// RSI values aligned 1:1 with the bars of a `PriceSeries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiSeries {
    period: usize,
    values: Vec<Option<f64>>,
}

impl RsiSeries {
    /// Wrap precomputed values, e.g. a stored RSI column
    pub fn from_values(period: usize, values: Vec<Option<f64>>) -> Self {
        Self { period, values }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }
}

/// `PARA_ERROR` when `period` is 0 or no window can ever fill
/// (`period >= bars`)
pub fn check_period(period: usize, bars: usize) -> CycleResult<()> {
    if period == 0 {
        return Err(CycleError::new("rsi period must be > 0", ErrCode::ParaError));
    }
    if period >= bars {
        return Err(CycleError::new(
            format!(
                "rsi period {} needs more than {} bars, series has {}",
                period, period, bars
            ),
            ErrCode::ParaError,
        ));
    }
    Ok(())
}

/// Compute the RSI of the closes of `series`.
///
/// Fails with `PARA_ERROR` when the period does not fit the series, see
/// [`check_period`].
pub fn calculate_rsi(series: &PriceSeries, period: usize) -> CycleResult<RsiSeries> {
    check_period(period, series.len())?;

    let mut model = RsiModel::new(period);
    let values: Vec<Option<f64>> = series.closes().map(|c| model.add(c)).collect();
    let rsi = RsiSeries::from_values(period, values);
    debug!(period, bars = rsi.len(), defined = rsi.defined_count(), "rsi computed");
    Ok(rsi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::utils::approx_eq;

    fn closes(v: &[f64]) -> PriceSeries {
        PriceSeries::from_closes(v).unwrap()
    }

    #[test]
    fn test_warm_up_is_undefined() {
        let rsi = calculate_rsi(&closes(&[1.0, 2.0, 1.5, 2.5, 3.0, 2.0]), 3).unwrap();
        assert_eq!(rsi.len(), 6);
        assert!(rsi.values()[..3].iter().all(Option::is_none));
        assert!(rsi.values()[3..].iter().all(Option::is_some));
    }

    #[test]
    fn test_known_values() {
        // deltas: +1, -0.5, +1, +0.5, -1
        let rsi = calculate_rsi(&closes(&[1.0, 2.0, 1.5, 2.5, 3.0, 2.0]), 3).unwrap();
        // window (+1, -0.5, +1): gain 2/3, loss 0.5/3 -> rs 4 -> 80
        assert!(approx_eq(rsi.get(3).unwrap(), 80.0, 1e-9));
        // window (-0.5, +1, +0.5): gain 1.5/3, loss 0.5/3 -> rs 3 -> 75
        assert!(approx_eq(rsi.get(4).unwrap(), 75.0, 1e-9));
        // window (+1, +0.5, -1): gain 1.5/3, loss 1/3 -> rs 1.5 -> 60
        assert!(approx_eq(rsi.get(5).unwrap(), 60.0, 1e-9));
    }

    #[test]
    fn test_monotonic_up_saturates() {
        let v: Vec<f64> = (10..30).map(|x| x as f64).collect();
        let rsi = calculate_rsi(&closes(&v), 5).unwrap();
        for i in 5..v.len() {
            assert_eq!(rsi.get(i), Some(100.0));
        }
    }

    #[test]
    fn test_monotonic_down_is_zero() {
        let v: Vec<f64> = (1..=20).rev().map(|x| x as f64).collect();
        let rsi = calculate_rsi(&closes(&v), 4).unwrap();
        for i in 4..v.len() {
            assert_eq!(rsi.get(i), Some(0.0));
        }
    }

    #[test]
    fn test_flat_series_is_undefined() {
        let rsi = calculate_rsi(&closes(&[5.0; 10]), 3).unwrap();
        assert_eq!(rsi.defined_count(), 0);
        assert_eq!(rsi.last(), None);
    }

    #[test]
    fn test_flat_then_move() {
        // once a gain enters the window the value is defined again
        let rsi = calculate_rsi(&closes(&[5.0, 5.0, 5.0, 5.0, 6.0]), 3).unwrap();
        assert_eq!(rsi.get(3), None);
        assert_eq!(rsi.get(4), Some(100.0));
    }

    #[test]
    fn test_bad_period() {
        let s = closes(&[1.0, 2.0, 3.0]);
        assert_eq!(calculate_rsi(&s, 0).unwrap_err().errcode, ErrCode::ParaError);
        assert_eq!(calculate_rsi(&s, 3).unwrap_err().errcode, ErrCode::ParaError);
        assert!(calculate_rsi(&s, 2).is_ok());
    }

    #[test]
    fn test_check_period() {
        assert!(check_period(5, 6).is_ok());
        let err = check_period(6, 6).unwrap_err();
        assert_eq!(err.msg, "rsi period 6 needs more than 6 bars, series has 6");
        assert!(check_period(0, 6).unwrap_err().is_para_err());
    }

    #[test]
    fn test_range() {
        let v = [44.3, 44.1, 44.5, 43.9, 44.6, 44.8, 45.1, 44.7, 45.4, 45.8, 46.0, 45.6];
        let rsi = calculate_rsi(&closes(&v), 4).unwrap();
        for x in rsi.values().iter().flatten() {
            assert!((0.0..=100.0).contains(x));
        }
    }

    #[test]
    fn test_rsi_from_averages() {
        assert_eq!(rsi_from_averages(0.0, 0.0), None);
        assert_eq!(rsi_from_averages(1.0, 0.0), Some(100.0));
        assert_eq!(rsi_from_averages(0.0, 1.0), Some(0.0));
        assert_eq!(rsi_from_averages(1.0, 1.0), Some(50.0));
    }
}
