mod csv_source;
mod export;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rsi_cycle_core::analyzer::sweep::sweep_periods;
use rsi_cycle_core::{AnalysisOutcome, Analyzer, CycleConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Segment a price series into RSI threshold-cross cycles")]
struct Cli {
    /// CSV file with a header row and open/high/low/close columns
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file with rsi_period / overbought / oversold / autofix
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RSI lookback in bars
    #[arg(short, long)]
    period: Option<usize>,

    /// Overbought level
    #[arg(long)]
    overbought: Option<f64>,

    /// Oversold level
    #[arg(long)]
    oversold: Option<f64>,

    /// Widen inconsistent high/low values instead of rejecting the bar
    #[arg(long, default_value_t = false)]
    autofix: bool,

    /// Directory for crosses.csv, cycles.csv, rsi.csv and summary.json
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comma separated RSI periods to compare, e.g. 7,14,21
    #[arg(long, value_delimiter = ',')]
    sweep: Vec<usize>,
}

impl Cli {
    /// File config first, then command line overrides
    fn effective_config(&self) -> Result<CycleConfig> {
        let mut config = match &self.config {
            Some(path) => CycleConfig::from_json_file(path)?,
            None => CycleConfig::default(),
        };
        if let Some(p) = self.period {
            config.rsi_period = p;
        }
        if let Some(ob) = self.overbought {
            config.overbought = ob;
        }
        if let Some(os) = self.oversold {
            config.oversold = os;
        }
        config.autofix |= self.autofix;
        config.validate()?;
        Ok(config)
    }

    fn symbol(&self) -> String {
        self.input
            .file_stem()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "SERIES".to_string())
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.effective_config().context("invalid analysis parameters")?;
    info!(?config, "effective config");

    let series = csv_source::load_series(&cli.input, config.autofix)
        .with_context(|| format!("could not load price data from {}", cli.input.display()))?;
    report::print_header(&cli.symbol(), &series);

    if !cli.sweep.is_empty() {
        let results = sweep_periods(&series, &config, &cli.sweep);
        report::print_sweep(&results);
        return Ok(());
    }

    let analyzer = Analyzer::new(config)?;
    match analyzer.analyze(&series)? {
        AnalysisOutcome::NoCrosses { .. } => report::print_no_crosses(series.len()),
        AnalysisOutcome::Cycles(result) => {
            report::print_metrics(&series, &result);
            report::print_crosses(&series, &result);
            if let Some(dir) = &cli.output {
                export::write_all(dir, &series, &result, analyzer.config())?;
                println!();
                println!("Tables written to {}", dir.display());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error during analysis: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
