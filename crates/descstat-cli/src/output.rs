use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context;
use clap::ValueEnum;

use crate::report::Report;

/// How the report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables
    Text,
    /// A single pretty-printed JSON object
    Json,
}

/// Renders `report` in `format`, always ending with a newline.
pub fn render(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    let mut rendered = match format {
        OutputFormat::Text => report.to_string(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")?
        }
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Writes the rendered report to `path`, or to stdout when `path` is `None`.
pub fn write_report(
    report: &Report,
    format: OutputFormat,
    path: Option<&Path>,
) -> anyhow::Result<()> {
    let rendered = render(report, format)?;
    match path {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            log::info!("report written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write report to stdout")?;
        }
    }
    Ok(())
}
