//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Downstream endpoint override.
pub const ENV_CALC_SERVICE_URL: &str = "CALC_SERVICE_URL";
/// Storage root override.
pub const ENV_PV_PATH: &str = "PV_PATH";
/// Listen port override.
pub const ENV_PORT: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then process environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply the deployment environment variables on top of `config`.
///
/// Empty values are ignored, matching an unset variable.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(url) = var(ENV_CALC_SERVICE_URL) {
        config.downstream.url = url;
    }
    if let Some(root) = var(ENV_PV_PATH) {
        config.storage.root = PathBuf::from(root);
    }
    if let Some(port) = var(ENV_PORT) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
            var: ENV_PORT,
            value: port,
        })?;
    }

    Ok(())
}
