use tracing::{debug, trace};

use super::cross_event::CrossEvent;
use crate::common::{cycle_error::CycleResult, enums::CrossKind};
use crate::config::cycle_config::check_thresholds;
use crate::math::rsi::RsiSeries;

/// Scan the RSI for threshold crosses, in index order.
///
/// An overbought cross at `i` means `rsi[i-1] <= overbought < rsi[i]`,
/// an oversold cross means `rsi[i-1] >= oversold > rsi[i]`. Positions where
/// either sample is undefined are skipped. An empty result is not an error.
pub fn detect_crosses(
    rsi: &RsiSeries,
    overbought: f64,
    oversold: f64,
) -> CycleResult<Vec<CrossEvent>> {
    check_thresholds(overbought, oversold)?;

    let mut crosses = Vec::new();
    for (i, pair) in rsi.values().windows(2).enumerate() {
        let (prev, curr) = match (pair[0], pair[1]) {
            (Some(p), Some(c)) => (p, c),
            _ => continue,
        };
        let kind = if prev <= overbought && curr > overbought {
            CrossKind::Overbought
        } else if prev >= oversold && curr < oversold {
            CrossKind::Oversold
        } else {
            continue;
        };
        let event = CrossEvent::new(i + 1, kind, curr);
        trace!(index = event.index, %kind, rsi = curr, "rsi cross");
        crosses.push(event);
    }

    debug!(crosses = crosses.len(), overbought, oversold, "cross scan done");
    Ok(crosses)
}
