//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `server.port`.
pub const ENV_PORT: &str = "PORT";
/// Environment variable that overrides `auth.api_key`.
pub const ENV_API_KEY: &str = "API_KEY";
/// Environment variable that overrides `observability.log_level`.
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for environment variable {name}")]
    InvalidEnv { name: &'static str, value: String },

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

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(ENV_PORT) {
        config.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            name: ENV_PORT,
            value: port,
        })?;
    }
    if let Some(key) = lookup(ENV_API_KEY) {
        config.auth.api_key = key;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
    Ok(())
}

/// Build the effective configuration: defaults, then the optional file, then
/// the process environment. The result is validated.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [server]
            port = 8080

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.api_key, "12345");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        assert!(matches!(
            parse_config("[server\nport = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("PORT", "4000"), ("API_KEY", "secret"), ("LOG_LEVEL", "debug")]),
        )
        .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.auth.api_key, "secret");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_invalid_port_env() {
        let mut config = AppConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: "PORT", .. }));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validation_message_lists_every_error() {
        let err = ConfigError::Validation(vec![
            ValidationError::EmptyApiKey,
            ValidationError::ZeroTimeout,
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: auth.api_key must not be empty, \
             limits.request_timeout_secs must be greater than zero"
        );
    }
}
