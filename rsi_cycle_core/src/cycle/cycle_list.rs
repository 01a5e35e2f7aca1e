use tracing::debug;

use super::cycle::Cycle;
use crate::common::cycle_error::{CycleError, CycleResult};
use crate::cross::cross_event::CrossEvent;

/// Turn an ordered cross list into one cycle per cross.
///
/// Each cycle starts at its cross and ends one bar before the next cross;
/// the last one runs to `series_len - 1`.
pub fn build_cycles(crosses: &[CrossEvent], series_len: usize) -> CycleResult<Vec<Cycle>> {
    let last = crosses
        .last()
        .ok_or_else(|| CycleError::invalid_input("no crosses to build cycles from"))?;
    if last.index >= series_len {
        return Err(CycleError::invalid_input(format!(
            "cross at index {} is outside a series of {} bars",
            last.index, series_len
        )));
    }

    if let Some(pair) = crosses.windows(2).find(|w| w[0].index >= w[1].index) {
        return Err(CycleError::invalid_input(format!(
            "cross indices must be strictly increasing, got {} then {}",
            pair[0].index, pair[1].index
        )));
    }

    let cycles: Vec<Cycle> = crosses
        .iter()
        .enumerate()
        .map(|(k, cross)| {
            let end_index = match crosses.get(k + 1) {
                Some(next) => next.index - 1,
                None => series_len - 1,
            };
            Cycle {
                start_index: cross.index,
                end_index,
                cross_kind: cross.kind,
                cross_rsi: cross.rsi_value,
            }
        })
        .collect();

    debug!(cycles = cycles.len(), series_len, "cycles built");
    Ok(cycles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{cycle_error::ErrCode, enums::CrossKind};

    fn crosses(idx: &[usize]) -> Vec<CrossEvent> {
        idx.iter()
            .enumerate()
            .map(|(k, &i)| {
                let kind = if k % 2 == 0 { CrossKind::Overbought } else { CrossKind::Oversold };
                CrossEvent::new(i, kind, 50.0 + k as f64)
            })
            .collect()
    }

    #[test]
    fn test_two_crosses() {
        let cycles = build_cycles(&crosses(&[1, 3]), 5).unwrap();
        assert_eq!(cycles.len(), 2);
        assert_eq!((cycles[0].start_index, cycles[0].end_index), (1, 2));
        assert_eq!((cycles[1].start_index, cycles[1].end_index), (3, 4));
        assert_eq!(cycles[0].cross_kind, CrossKind::Overbought);
        assert_eq!(cycles[1].cross_kind, CrossKind::Oversold);
        assert_eq!(cycles[1].cross_rsi, 51.0);
    }

    #[test]
    fn test_contiguous_and_closed() {
        let cycles = build_cycles(&crosses(&[4, 5, 9, 17, 30]), 42).unwrap();
        for pair in cycles.windows(2) {
            assert_eq!(pair[0].end_index + 1, pair[1].start_index);
        }
        assert_eq!(cycles.last().unwrap().end_index, 41);
        assert!(cycles.iter().all(|c| c.start_index <= c.end_index));
        assert_eq!(cycles[0].len(), 1);
        assert_eq!(cycles.iter().map(Cycle::len).sum::<usize>(), 42 - 4);
    }

    #[test]
    fn test_cross_on_last_bar() {
        let cycles = build_cycles(&crosses(&[2, 7]), 8).unwrap();
        assert_eq!((cycles[1].start_index, cycles[1].end_index), (7, 7));
        assert!(cycles[1].contains(7));
        assert!(!cycles[0].contains(7));
    }

    #[test]
    fn test_empty_crosses() {
        let err = build_cycles(&[], 10).unwrap_err();
        assert_eq!(err.errcode, ErrCode::InvalidInput);
    }

    #[test]
    fn test_cross_outside_series() {
        let err = build_cycles(&crosses(&[3, 10]), 10).unwrap_err();
        assert_eq!(err.errcode, ErrCode::InvalidInput);
    }

    #[test]
    fn test_out_of_order_crosses() {
        let err = build_cycles(&crosses(&[5, 0]), 10).unwrap_err();
        assert_eq!(err.errcode, ErrCode::InvalidInput);
        assert!(build_cycles(&crosses(&[2, 8, 4]), 10).is_err());
    }

    #[test]
    fn test_duplicate_cross_index() {
        let err = build_cycles(&crosses(&[3, 3]), 10).unwrap_err();
        assert_eq!(err.errcode, ErrCode::InvalidInput);
        assert!(err.msg.contains("3 then 3"));
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let stored = crosses(&[2, 6, 11]);
        assert_eq!(build_cycles(&stored, 20).unwrap(), build_cycles(&stored.clone(), 20).unwrap());
    }
}
