use serde::Serialize;
use tracing::{debug, info};

use crate::common::cycle_error::{CycleError, CycleResult, ErrCode};
use crate::config::cycle_config::CycleConfig;
use crate::cross::{cross_detector::detect_crosses, cross_event::CrossEvent};
use crate::cycle::{
    classifier::classify_cycles,
    cycle::ClassifiedCycle,
    cycle_list::build_cycles,
    cycle_stats::CycleStats,
};
use crate::kline::price_series::PriceSeries;
use crate::math::rsi::{calculate_rsi, check_period, RsiSeries};

/// Everything one run produces when at least one cross was found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub rsi: RsiSeries,
    pub crosses: Vec<CrossEvent>,
    pub cycles: Vec<ClassifiedCycle>,
    pub stats: CycleStats,
}

impl AnalysisReport {
    pub fn win_rate(&self) -> f64 {
        self.stats.win_rate
    }

    pub fn avg_cycle_length(&self) -> f64 {
        self.stats.average_cycle_length
    }
}

/// Result of a run. `NoCrosses` is a normal terminal state, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    NoCrosses { rsi: RsiSeries },
    Cycles(AnalysisReport),
}

impl AnalysisOutcome {
    pub fn rsi(&self) -> &RsiSeries {
        match self {
            AnalysisOutcome::NoCrosses { rsi } => rsi,
            AnalysisOutcome::Cycles(report) => &report.rsi,
        }
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisOutcome::NoCrosses { .. } => None,
            AnalysisOutcome::Cycles(report) => Some(report),
        }
    }

    pub fn into_report(self) -> Option<AnalysisReport> {
        match self {
            AnalysisOutcome::NoCrosses { .. } => None,
            AnalysisOutcome::Cycles(report) => Some(report),
        }
    }

    pub fn has_crosses(&self) -> bool {
        matches!(self, AnalysisOutcome::Cycles(_))
    }
}

/// Validate everything before any stage runs
fn check_input(series: &PriceSeries, config: &CycleConfig) -> CycleResult<()> {
    config.validate()?;
    if series.is_empty() {
        return Err(CycleError::new("price series has no bars", ErrCode::EmptySeries));
    }
    check_period(config.rsi_period, series.len())
}

/// Run RSI, cross detection, cycle building and classification over `series`
pub fn analyze(series: &PriceSeries, config: &CycleConfig) -> CycleResult<AnalysisOutcome> {
    check_input(series, config)?;

    let rsi = calculate_rsi(series, config.rsi_period)?;
    let crosses = detect_crosses(&rsi, config.overbought, config.oversold)?;
    if crosses.is_empty() {
        info!(bars = series.len(), period = config.rsi_period, "no rsi crosses found");
        return Ok(AnalysisOutcome::NoCrosses { rsi });
    }

    let cycles = build_cycles(&crosses, series.len())?;
    let cycles = classify_cycles(series, &cycles)?;
    let stats = CycleStats::from_cycles(&cycles)?;
    debug!(
        crosses = crosses.len(),
        positive = stats.positive_count,
        negative = stats.negative_count,
        win_rate = stats.win_rate,
        "analysis done"
    );

    Ok(AnalysisOutcome::Cycles(AnalysisReport {
        rsi,
        crosses,
        cycles,
        stats,
    }))
}

/// Holds a validated configuration for repeated runs over different series
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: CycleConfig,
}

impl Analyzer {
    pub fn new(config: CycleConfig) -> CycleResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn analyze(&self, series: &PriceSeries) -> CycleResult<AnalysisOutcome> {
        analyze(series, &self.config)
    }
}
