//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the shared app token.
pub const ENV_API_TOKEN: &str = "APP_API_TOKEN";

/// Environment variable overriding the listener address.
pub const ENV_BIND_ADDRESS: &str = "APP_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides are applied after parsing, before validation.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, |key| std::env::var(key).ok())
}

/// Parse configuration text, applying overrides from `lookup`.
pub fn parse_config<F>(content: &str, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: ServiceConfig = toml::from_str(content)?;
    apply_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

impl ServiceConfig {
    /// Defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        apply_overrides(&mut config, |key| std::env::var(key).ok());
        config
    }
}

/// Apply environment-style overrides to `config`.
pub fn apply_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(ENV_API_TOKEN) {
        config.auth.api_token = Some(token).filter(|t| !t.is_empty());
    }

    if let Some(addr) = lookup(ENV_BIND_ADDRESS).filter(|a| !a.is_empty()) {
        config.listener.bind_address = addr;
    }
}
