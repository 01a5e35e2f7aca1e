use rsi_cycle_core::analyzer::sweep::SweepResult;
use rsi_cycle_core::{AnalysisOutcome, AnalysisReport, PriceSeries};

use crate::export::cross_rows;

pub fn print_header(symbol: &str, series: &PriceSeries) {
    println!("{} - RSI cycle analysis", symbol);
    if let (Some(first), Some(last)) = (series.first_time(), series.last_time()) {
        println!("From {} to {}", first, last);
    }
}

pub fn print_metrics(series: &PriceSeries, report: &AnalysisReport) {
    let s = &report.stats;
    println!();
    println!("{:<20}{}", "Total bars", series.len());
    println!("{:<20}{}", "RSI crosses", report.crosses.len());
    println!("{:<20}{}", "Positive cycles", s.positive_count);
    println!("{:<20}{}", "Negative cycles", s.negative_count);
    println!("{:<20}{:.1}%", "Win rate", s.win_rate);
    println!("{:<20}{:.1} bars", "Average duration", s.average_cycle_length);
}

pub fn print_crosses(series: &PriceSeries, report: &AnalysisReport) {
    println!();
    println!("{:<18} {:<11} {:>12} {:>6}", "Time", "Kind", "Price", "RSI");
    for row in cross_rows(series, report) {
        println!(
            "{:<18} {:<11} {:>12} {:>6.1}",
            row.time,
            row.kind,
            format!("${:.2}", row.price),
            row.rsi
        );
    }
}

pub fn print_no_crosses(bars: usize) {
    println!();
    println!("No RSI crosses were detected over the {} analysed bars.", bars);
    println!("Try a longer history or wider thresholds.");
}

pub fn print_sweep(results: &[SweepResult]) {
    println!();
    println!("{:>7} {:>8} {:>9} {:>12}", "Period", "Crosses", "Win rate", "Avg length");
    for r in results {
        match &r.outcome {
            Ok(AnalysisOutcome::Cycles(report)) => println!(
                "{:>7} {:>8} {:>8.1}% {:>12.1}",
                r.config.rsi_period,
                report.crosses.len(),
                report.win_rate(),
                report.avg_cycle_length()
            ),
            Ok(AnalysisOutcome::NoCrosses { .. }) => {
                println!("{:>7} {:>8}", r.config.rsi_period, "no crosses")
            }
            Err(e) => println!("{:>7} error: {}", r.config.rsi_period, e),
        }
    }
}
