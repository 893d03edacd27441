use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use descstat::{EngineConfig, StatisticsEngine};

use crate::{
    input,
    output::{self, OutputFormat},
    report::Report,
};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Values to analyze. Read from --input or stdin when omitted
    #[arg(allow_negative_numbers = true)]
    values: Vec<String>,

    /// Read values from this file instead of stdin
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// JSON file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decimal digits derived values are rounded to (overrides --config)
    #[arg(long, short)]
    precision: Option<i32>,

    /// Report format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Extra percentiles to report, as fractions (0.9) or percentages (90)
    #[arg(long, value_delimiter = ',')]
    percentiles: Vec<f64>,

    /// Write the report to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl CommandArgs {
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => input::read_config(path)?,
            None => EngineConfig::default(),
        };
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        Ok(config)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let config = args.engine_config()?;

    let dataset = input::read_dataset(&args.values, args.input.as_deref())?;
    if dataset.is_empty() {
        log::warn!("no usable values; statistics that divide by the population size are NaN");
    }

    let mut engine = StatisticsEngine::from_dataset(dataset, config.precision);
    let percentiles = engine
        .percentiles(&args.percentiles)
        .context("Invalid --percentiles value")?;
    let report = Report::new(engine.summarize(), &percentiles);

    output::write_report(&report, args.format, args.output.as_deref())?;
    Ok(())
}
