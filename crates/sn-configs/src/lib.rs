//! # sn-configs
//!
//! Layered runtime settings: built-in defaults, then an optional TOML file,
//! then `SOCIAL__*` environment variables (`SOCIAL__LOG__LEVEL=debug`).
//! A `.env` file in the working directory is loaded first if present.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_NAME: &str = "social";
pub const ENV_PREFIX: &str = "SOCIAL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub log: LogSettings,
    #[serde(default)]
    pub seed: SeedSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogSettings {
    /// An `EnvFilter` directive; `RUST_LOG` still wins when set
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedSettings {
    /// JSON seed file applied to the registry at startup
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Loads `.env`, then layers defaults, the config file and the process
    /// environment. An explicit `file` must exist; the default one may not.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::load_from(file, Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    /// Same layering as `load` with an explicit environment source.
    pub fn load_from(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .add_source(file_source)
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
