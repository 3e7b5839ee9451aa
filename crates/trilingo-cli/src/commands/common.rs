use crate::core::CliError;
use clap::Args;
use std::path::PathBuf;
use trilingo_core::ParamValue;
use trilingo_toml::TrilingoConfig;

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Path to trilingo.toml (defaults to $TRILINGO_CONFIG, then ./trilingo.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<TrilingoConfig, CliError> {
        let config = match &self.config {
            Some(path) => TrilingoConfig::read_from_path(path)?,
            None => TrilingoConfig::discover()?,
        };
        Ok(config)
    }
}

/// Parses a `name=value` placeholder argument. Integers and decimals become
/// numbers, anything else stays text.
pub fn parse_param(raw: &str) -> Result<(String, ParamValue), String> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(format!("expected name=value, found '{raw}'"));
    };
    if name.is_empty() {
        return Err(format!("missing placeholder name in '{raw}'"));
    }

    let value = if let Ok(integer) = value.parse::<i64>() {
        ParamValue::from(integer)
    } else if let Ok(float) = value.parse::<f64>()
        && float.is_finite()
    {
        ParamValue::from(float)
    } else {
        ParamValue::from(value)
    };
    Ok((name.to_string(), value))
}
