//! Configuration validation module.
//!
//! Fails fast on invalid configuration rather than at first use.

use crate::AppConfig;
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A required host is empty.
    EmptyHost { name: String },
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size must be positive.
    EmptyPool { name: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String },
    /// Database name or user is empty.
    MissingDatabaseField { name: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Log format is invalid.
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHost { name } => write!(f, "{} cannot be empty", name),
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidPoolSize { min, max } => write!(
                f,
                "Invalid pool size: min ({}) cannot be greater than max ({})",
                min, max
            ),
            Self::EmptyPool { name } => write!(f, "{} must be at least 1", name),
            Self::NonPositiveTimeout { name } => write!(f, "{} must be positive", name),
            Self::MissingDatabaseField { name } => write!(f, "{} cannot be empty", name),
            Self::InvalidLogLevel { value } => write!(
                f,
                "Invalid log level '{}' (expected trace, debug, info, warn, or error)",
                value
            ),
            Self::InvalidLogFormat { value } => {
                write!(f, "Invalid log format '{}' (expected json or pretty)", value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    const VALID_LOG_FORMATS: &'static [&'static str] = &["json", "pretty"];

    /// Validates the entire application configuration.
    ///
    /// Returns all errors found, not just the first.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(config, &mut errors);
        Self::validate_database(config, &mut errors);
        Self::validate_redis(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let server = &config.server;
        if server.host.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyHost {
                name: "server.host".to_string(),
            });
        }
        if server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: server.port,
            });
        }
        if server.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
            });
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let db = &config.database;
        if db.host.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyHost {
                name: "database.host".to_string(),
            });
        }
        if db.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "database.port".to_string(),
                value: db.port,
            });
        }
        if db.name.trim().is_empty() {
            errors.push(ConfigValidationError::MissingDatabaseField {
                name: "database.name".to_string(),
            });
        }
        if db.user.trim().is_empty() {
            errors.push(ConfigValidationError::MissingDatabaseField {
                name: "database.user".to_string(),
            });
        }
        if db.max_connections == 0 {
            errors.push(ConfigValidationError::EmptyPool {
                name: "database.max_connections".to_string(),
            });
        }
        if db.min_connections > db.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: db.min_connections,
                max: db.max_connections,
            });
        }
        if db.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
            });
        }
    }

    fn validate_redis(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let redis = &config.redis;
        if !redis.enabled {
            return;
        }
        if redis.host.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyHost {
                name: "redis.host".to_string(),
            });
        }
        if redis.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "redis.port".to_string(),
                value: redis.port,
            });
        }
        if redis.pool_size == 0 {
            errors.push(ConfigValidationError::EmptyPool {
                name: "redis.pool_size".to_string(),
            });
        }
        if redis.timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "redis.timeout_secs".to_string(),
            });
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.observability.log_level.clone(),
            });
        }

        let format = config.observability.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.observability.log_format.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_ports() {
        let mut config = AppConfig::default();
        config.database.port = 0;
        config.redis.port = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ConfigValidationError::InvalidPort {
            name: "database.port".to_string(),
            value: 0,
        }));
    }

    #[test]
    fn test_disabled_redis_is_not_validated() {
        let mut config = AppConfig::default();
        config.redis.enabled = false;
        config.redis.host = String::new();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_pool_size() {
        let mut config = AppConfig::default();
        config.database.min_connections = 20;
        config.database.max_connections = 5;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors, vec![ConfigValidationError::InvalidPoolSize { min: 20, max: 5 }]);
    }

    #[test]
    fn test_invalid_observability() {
        let mut config = AppConfig::default();
        config.observability.log_level = "verbose".to_string();
        config.observability.log_format = "xml".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            ConfigValidationError::EmptyHost {
                name: "redis.host".to_string(),
            },
            ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
            },
        ];
        let output = format_validation_errors(&errors);
        assert!(output.contains("1. redis.host cannot be empty"));
        assert!(output.contains("2. server.request_timeout_secs must be positive"));
    }
}
