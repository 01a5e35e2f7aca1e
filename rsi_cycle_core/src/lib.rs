pub mod analyzer;
pub mod common;
pub mod config;
pub mod cross;
pub mod cycle;
pub mod kline;
pub mod math;

pub use analyzer::analyzer::{analyze, AnalysisOutcome, AnalysisReport, Analyzer};
pub use common::cycle_error::{CycleError, ErrCode};
pub use config::cycle_config::CycleConfig;
pub use kline::{price_bar::PriceBar, price_series::PriceSeries};
