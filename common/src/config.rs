use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::exit;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub azure: AzureArgs,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AzureArgs {
    /// Azure CLI binary
    #[serde(default = "default_cli")]
    pub cli: String,
    /// Passed to every call as `--subscription`
    pub subscription: Option<String>,
}

fn default_cli() -> String {
    "az".to_owned()
}

impl Default for AzureArgs {
    fn default() -> Self {
        Self {
            cli: default_cli(),
            subscription: None,
        }
    }
}

pub fn parse_config(file: &str) -> Result<Config> {
    let config = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(err) => exit!(err, "Could not read config file {}", file),
    };

    let config: Result<Config, toml::de::Error> = toml::from_str(config.as_str());
    let config = match config {
        Ok(c) => c,
        Err(err) => exit!(err, "Could not parse config file {}", file),
    };

    info!("config file parsed");
    Ok(config)
}

/// Reads `file` when given, defaults otherwise.
pub fn load_config(file: Option<&str>) -> Result<Config> {
    match file {
        Some(f) => parse_config(f),
        None => Ok(Config::default()),
    }
}
