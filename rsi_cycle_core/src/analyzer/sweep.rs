use rayon::prelude::*;
use tracing::debug;

use super::analyzer::{analyze, AnalysisOutcome};
use crate::common::cycle_error::CycleResult;
use crate::config::cycle_config::CycleConfig;
use crate::kline::price_series::PriceSeries;

/// One configuration of a sweep and what it produced
#[derive(Debug)]
pub struct SweepResult {
    pub config: CycleConfig,
    pub outcome: CycleResult<AnalysisOutcome>,
}

/// Analyze the same series under each configuration, in parallel.
/// Results keep the order of `configs`.
pub fn sweep(series: &PriceSeries, configs: &[CycleConfig]) -> Vec<SweepResult> {
    debug!(runs = configs.len(), bars = series.len(), "parameter sweep");
    configs
        .par_iter()
        .map(|config| SweepResult {
            config: config.clone(),
            outcome: analyze(series, config),
        })
        .collect()
}

/// Sweep over RSI periods, thresholds taken from `base`
pub fn sweep_periods(series: &PriceSeries, base: &CycleConfig, periods: &[usize]) -> Vec<SweepResult> {
    let configs: Vec<CycleConfig> = periods
        .iter()
        .map(|&p| base.clone().with_period(p))
        .collect();
    sweep(series, &configs)
}
