use std::{
    fs,
    io::{self, Read as _},
    path::Path,
};

use anyhow::Context;
use descstat::{Dataset, EngineConfig};
use serde_json::Value;

/// Load engine settings from a JSON file
///
/// Missing fields keep their defaults; unknown fields are an error.
pub fn read_config(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    log::debug!("loaded {config:?} from {}", path.display());
    Ok(config)
}

/// Collect the dataset from command line values, a file, or stdin
///
/// Values given on the command line win. Otherwise the file (or stdin) is
/// read either as a JSON array or as values separated by whitespace, commas
/// or semicolons.
pub fn read_dataset(values: &[String], input: Option<&Path>) -> anyhow::Result<Dataset> {
    if !values.is_empty() {
        return Ok(Dataset::parse(values));
    }
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read values file: {}", path.display()))?,
        None => {
            eprintln!("Reading values from stdin...");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read values from stdin")?;
            text
        }
    };
    parse_values(&text)
}

fn parse_values(text: &str) -> anyhow::Result<Dataset> {
    if text.trim_start().starts_with('[') {
        let values: Vec<Value> =
            serde_json::from_str(text).context("Failed to parse JSON array of values")?;
        return Ok(Dataset::parse(values.iter().filter_map(json_value_text)));
    }
    Ok(Dataset::parse(
        text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|s| !s.is_empty()),
    ))
}

fn json_value_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        other => {
            log::debug!("dropping non-numeric JSON entry {other}");
            None
        }
    }
}
