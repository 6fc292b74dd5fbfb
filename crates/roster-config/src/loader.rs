//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use roster_core::RosterError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type EnvVars = HashMap<String, String>;

/// Flat variables understood by container deployments, mapped onto config keys.
/// Ports are parsed as integers.
const LEGACY_STRING_VARS: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_NAME", "database.name"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("REDIS_HOST", "redis.host"),
];

const LEGACY_PORT_VARS: &[(&str, &str)] = &[
    ("DB_PORT", "database.port"),
    ("REDIS_PORT", "redis.port"),
    ("PORT", "server.port"),
];

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from `config_dir` and the process environment.
    ///
    /// Sources are layered in order, later ones winning:
    /// 1. `{config_dir}/default.toml`
    /// 2. `{config_dir}/{environment}.toml` (environment from `ROSTER_ENV`)
    /// 3. `{config_dir}/local.toml`
    /// 4. Environment variables with the `ROSTER__` prefix (`ROSTER__DATABASE__HOST`)
    /// 5. Flat deployment variables (`DB_HOST`, `DB_PORT`, `REDIS_HOST`, ...)
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self, RosterError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        Self::with_env(config_dir, std::env::vars().collect())
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, RosterError> {
        Self::new("./config")
    }

    /// Loads configuration using an explicit environment snapshot.
    pub fn with_env(config_dir: impl Into<PathBuf>, env: EnvVars) -> Result<Self, RosterError> {
        let config = Self::load_config(&config_dir.into(), &env)?;
        Ok(Self { config })
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &Path, env: &EnvVars) -> Result<AppConfig, RosterError> {
        let environment = env
            .get("ROSTER_ENV")
            .cloned()
            .unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{}.toml", name));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ROSTER")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone().into_iter().collect())),
        );

        builder = Self::apply_legacy_overrides(builder, env)?;

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_roster_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| RosterError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }

    fn apply_legacy_overrides(
        mut builder: ConfigBuilder<config::builder::DefaultState>,
        env: &EnvVars,
    ) -> Result<ConfigBuilder<config::builder::DefaultState>, RosterError> {
        for (var, key) in LEGACY_STRING_VARS {
            if let Some(value) = env.get(*var) {
                debug!("Applying {} to {}", var, key);
                builder = builder
                    .set_override(*key, value.clone())
                    .map_err(config_error_to_roster_error)?;
            }
        }

        for (var, key) in LEGACY_PORT_VARS {
            if let Some(value) = env.get(*var) {
                let port: i64 = value.trim().parse().map_err(|_| {
                    RosterError::Configuration(format!("{} must be an integer, got '{}'", var, value))
                })?;
                debug!("Applying {} to {}", var, key);
                builder = builder
                    .set_override(*key, port)
                    .map_err(config_error_to_roster_error)?;
            }
        }

        Ok(builder)
    }
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn env(pairs: &[(&str, &str)]) -> EnvVars {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_files_or_env() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::with_env(dir.path(), EnvVars::new())
            .unwrap()
            .into_config();

        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.password, "mypassword");
        assert_eq!(config.redis.port, 6379);
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_file_layers_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[database]\nhost = \"pg.internal\"\nname = \"users\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("staging.toml"), "[database]\nname = \"users_staging\"\n").unwrap();

        let config = ConfigLoader::with_env(dir.path(), env(&[("ROSTER_ENV", "staging")]))
            .unwrap()
            .into_config();

        assert_eq!(config.database.host, "pg.internal");
        assert_eq!(config.database.name, "users_staging");
        assert_eq!(config.database.port, 5432);
    }

    #[test]
    fn test_prefixed_env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[redis]\nhost = \"from-file\"\n").unwrap();

        let config = ConfigLoader::with_env(
            dir.path(),
            env(&[("ROSTER__REDIS__HOST", "from-env"), ("ROSTER__REDIS__ENTRY_TTL_SECS", "60")]),
        )
        .unwrap()
        .into_config();

        assert_eq!(config.redis.host, "from-env");
        assert_eq!(config.redis.entry_ttl_secs, 60);
    }

    #[test]
    fn test_legacy_deployment_variables() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::with_env(
            dir.path(),
            env(&[
                ("DB_HOST", "postgres"),
                ("DB_PORT", "5433"),
                ("DB_NAME", "appdb"),
                ("DB_USER", "app"),
                ("DB_PASSWORD", "secret"),
                ("REDIS_HOST", "cache"),
                ("REDIS_PORT", "6380"),
            ]),
        )
        .unwrap()
        .into_config();

        assert_eq!(config.database.host, "postgres");
        assert_eq!(config.database.port, 5433);
        assert_eq!(config.database.name, "appdb");
        assert_eq!(config.database.user, "app");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.redis.host, "cache");
        assert_eq!(config.redis.port, 6380);
    }

    #[test]
    fn test_invalid_legacy_port_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::with_env(dir.path(), env(&[("DB_PORT", "fivefour")])).unwrap_err();
        assert!(matches!(err, RosterError::Configuration(msg) if msg.contains("DB_PORT")));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::with_env(dir.path(), env(&[("REDIS_HOST", "")])).unwrap_err();
        assert!(matches!(err, RosterError::Configuration(msg) if msg.contains("redis.host")));
    }
}
