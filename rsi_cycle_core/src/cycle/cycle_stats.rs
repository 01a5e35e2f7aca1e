use serde::{Deserialize, Serialize};

use super::cycle::ClassifiedCycle;
use crate::common::cycle_error::{CycleError, CycleResult, ErrCode};

/// Aggregate counts over a classified cycle list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    pub total: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    /// Share of positive cycles, in percent
    pub win_rate: f64,
    /// Mean cycle length, in bars
    pub average_cycle_length: f64,
}

impl CycleStats {
    pub fn from_cycles(cycles: &[ClassifiedCycle]) -> CycleResult<Self> {
        if cycles.is_empty() {
            return Err(CycleError::new(
                "win rate is undefined without cycles",
                ErrCode::DivisionUndefined,
            ));
        }
        let total = cycles.len();
        let positive_count = cycles.iter().filter(|c| c.is_positive()).count();
        let bars: usize = cycles.iter().map(ClassifiedCycle::len).sum();

        Ok(Self {
            total,
            positive_count,
            negative_count: total - positive_count,
            win_rate: positive_count as f64 / total as f64 * 100.0,
            average_cycle_length: bars as f64 / total as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::enums::{CrossKind, CycleSign};
    use crate::cycle::cycle::Cycle;

    fn cc(start: usize, end: usize, sign: CycleSign) -> ClassifiedCycle {
        ClassifiedCycle {
            cycle: Cycle {
                start_index: start,
                end_index: end,
                cross_kind: CrossKind::Oversold,
                cross_rsi: 25.0,
            },
            sign,
            cross_price: 1.0,
            exit_price: 1.0,
        }
    }

    #[test]
    fn test_counts_and_rates() {
        let cycles = vec![
            cc(2, 5, CycleSign::Positive),
            cc(6, 6, CycleSign::Negative),
            cc(7, 13, CycleSign::Positive),
            cc(14, 15, CycleSign::Negative),
        ];
        let s = CycleStats::from_cycles(&cycles).unwrap();
        assert_eq!(s.total, 4);
        assert_eq!(s.positive_count, 2);
        assert_eq!(s.negative_count, 2);
        assert_eq!(s.positive_count + s.negative_count, s.total);
        assert_eq!(s.win_rate, 50.0);
        // lengths 4, 1, 7, 2
        assert_eq!(s.average_cycle_length, 3.5);
    }

    #[test]
    fn test_single_negative() {
        let s = CycleStats::from_cycles(&[cc(0, 9, CycleSign::Negative)]).unwrap();
        assert_eq!(s.win_rate, 0.0);
        assert_eq!(s.average_cycle_length, 10.0);
    }

    #[test]
    fn test_empty_is_undefined() {
        let err = CycleStats::from_cycles(&[]).unwrap_err();
        assert_eq!(err.errcode, ErrCode::DivisionUndefined);
    }
}
