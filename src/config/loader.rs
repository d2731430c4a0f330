//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

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

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(!config.logging.debug);
        assert!(!config.logging.freeze_time);
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
    }

    #[test]
    fn test_parse_sections() {
        let config = parse_config(
            r#"
            [logging]
            debug = true
            freeze_time = true

            [server]
            bind_address = "0.0.0.0:3000"
            "#,
        )
        .unwrap();

        assert!(config.logging.debug);
        assert!(config.logging.freeze_time);
        assert_eq!(config.server.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_config("[logging]\ndebug = \"yes\""), Err(ConfigError::Parse(_))));
        assert!(matches!(
            parse_config("[server]\nbind_address = \"x\""),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            load_config(Path::new("does-not-exist.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("tagged-log-config-{}.toml", std::process::id()));
        fs::write(&path, "[logging]\ndebug = true\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.logging.debug);

        fs::remove_file(&path).unwrap_or_default();
    }
}
