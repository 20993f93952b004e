//! Configuration loading.
//!
//! A single TOML file plus `ARBOR_*` environment variables, merged through
//! the `config` crate. Everything has a default so the store runs with no
//! configuration at all.

use crate::logging::LoggingConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArborConfig {
    /// Storage root holding the node tree and the index artifact.
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ArborConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_content_root() -> PathBuf {
    directories::ProjectDirs::from("", "arbor", "arbor")
        .map(|dirs| dirs.data_dir().join("content"))
        .unwrap_or_else(|| PathBuf::from("content"))
}

impl ArborConfig {
    /// Load from an explicit file, or from an optional `arbor.toml` in the
    /// working directory, with `ARBOR_*` environment overrides on top
    /// (e.g. `ARBOR_CONTENT_ROOT`, `ARBOR_LOGGING__LEVEL`).
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        builder = match file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("arbor").required(false)),
        };
        builder = builder.add_source(Environment::with_prefix("ARBOR").separator("__"));
        builder.build()?.try_deserialize()
    }
}
