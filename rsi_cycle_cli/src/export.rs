use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rsi_cycle_core::{AnalysisReport, CycleConfig, PriceSeries};
use serde::Serialize;
use tracing::info;

/// Row of `crosses.csv`
#[derive(Debug, Serialize)]
pub struct CrossRow {
    pub index: usize,
    pub time: String,
    pub kind: String,
    pub price: f64,
    pub rsi: f64,
}

/// Row of `cycles.csv`
#[derive(Debug, Serialize)]
pub struct CycleRow {
    pub cycle: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub start_time: String,
    pub end_time: String,
    pub cross_kind: String,
    pub cross_rsi: f64,
    pub cross_price: f64,
    pub exit_price: f64,
    pub sign: String,
    pub bars: usize,
}

/// Row of `rsi.csv`
#[derive(Debug, Serialize)]
struct RsiRow {
    index: usize,
    time: String,
    close: f64,
    rsi: Option<f64>,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    total_bars: usize,
    crosses: usize,
    positive_cycles: usize,
    negative_cycles: usize,
    win_rate: f64,
    average_cycle_length: f64,
    config: &'a CycleConfig,
}

fn time_of(series: &PriceSeries, index: usize) -> String {
    series
        .get(index)
        .and_then(|b| b.time)
        .map(|t| t.to_minute_str())
        .unwrap_or_else(|| index.to_string())
}

pub fn cross_rows(series: &PriceSeries, report: &AnalysisReport) -> Vec<CrossRow> {
    report
        .crosses
        .iter()
        .filter_map(|c| {
            let bar = series.get(c.index)?;
            Some(CrossRow {
                index: c.index,
                time: time_of(series, c.index),
                kind: c.kind.to_string(),
                price: bar.ohlc_average(),
                rsi: c.rsi_value,
            })
        })
        .collect()
}

pub fn cycle_rows(series: &PriceSeries, report: &AnalysisReport) -> Vec<CycleRow> {
    report
        .cycles
        .iter()
        .enumerate()
        .map(|(i, c)| CycleRow {
            cycle: i + 1,
            start_index: c.start_index(),
            end_index: c.end_index(),
            start_time: time_of(series, c.start_index()),
            end_time: time_of(series, c.end_index()),
            cross_kind: c.cycle.cross_kind.to_string(),
            cross_rsi: c.cycle.cross_rsi,
            cross_price: c.cross_price,
            exit_price: c.exit_price,
            sign: c.sign.to_string(),
            bars: c.len(),
        })
        .collect()
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = rows.len(), "table written");
    Ok(())
}

/// Write crosses.csv, cycles.csv, rsi.csv and summary.json under `dir`
pub fn write_all(
    dir: &Path,
    series: &PriceSeries,
    report: &AnalysisReport,
    config: &CycleConfig,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;

    write_csv(&dir.join("crosses.csv"), &cross_rows(series, report))?;
    write_csv(&dir.join("cycles.csv"), &cycle_rows(series, report))?;

    let rsi_rows: Vec<RsiRow> = series
        .iter()
        .map(|b| RsiRow {
            index: b.index,
            time: time_of(series, b.index),
            close: b.close,
            rsi: report.rsi.get(b.index),
        })
        .collect();
    write_csv(&dir.join("rsi.csv"), &rsi_rows)?;

    let summary = Summary {
        total_bars: series.len(),
        crosses: report.crosses.len(),
        positive_cycles: report.stats.positive_count,
        negative_cycles: report.stats.negative_count,
        win_rate: report.stats.win_rate,
        average_cycle_length: report.stats.average_cycle_length,
        config,
    };
    let path = dir.join("summary.json");
    fs::write(&path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!(path = %path.display(), "summary written");
    Ok(())
}
