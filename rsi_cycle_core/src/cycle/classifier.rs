use super::cycle::{ClassifiedCycle, Cycle};
use crate::common::{
    cycle_error::{CycleError, CycleResult},
    enums::CycleSign,
};
use crate::kline::price_series::PriceSeries;

/// Positive only when the exit close is strictly above the cross price
pub fn classify(cross_price: f64, exit_price: f64) -> CycleSign {
    if exit_price > cross_price {
        CycleSign::Positive
    } else {
        CycleSign::Negative
    }
}

pub fn classify_cycle(series: &PriceSeries, cycle: &Cycle) -> CycleResult<ClassifiedCycle> {
    let (start, end) = match (series.get(cycle.start_index), series.get(cycle.end_index)) {
        (Some(s), Some(e)) if cycle.start_index <= cycle.end_index => (s, e),
        _ => {
            return Err(CycleError::invalid_input(format!(
                "cycle [{}, {}] does not fit a series of {} bars",
                cycle.start_index,
                cycle.end_index,
                series.len()
            )))
        }
    };
    let cross_price = start.ohlc_average();
    let exit_price = end.close;
    Ok(ClassifiedCycle {
        cycle: *cycle,
        sign: classify(cross_price, exit_price),
        cross_price,
        exit_price,
    })
}

pub fn classify_cycles(series: &PriceSeries, cycles: &[Cycle]) -> CycleResult<Vec<ClassifiedCycle>> {
    cycles.iter().map(|c| classify_cycle(series, c)).collect()
}
