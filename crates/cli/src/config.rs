// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Configuration is read from `config.toml`, looked up in this order:
//! - the `--config` flag
//! - `$WISSSH_CONFIG`
//! - `<config dir>/wisssh/config.toml`
//!
//! A missing file means defaults. `$WISSSH_API_ORIGIN` and
//! `$WISSSH_DATA_DIR` override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::images::DEFAULT_BATCH_SIZE;

const APP_DIR_NAME: &str = "wisssh";
const CONFIG_FILE_NAME: &str = "config.toml";
const SESSION_FILE_NAME: &str = "session.json";

/// API origin used when nothing else is configured.
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL every REST path is relative to.
    pub api_origin: String,
    /// Where the session file lives. Defaults to `<data dir>/wisssh`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub images: ImageConfig,
}

/// Settings of the image pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Images fetched concurrently per tick.
    pub batch_size: usize,
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_origin: DEFAULT_API_ORIGIN.to_string(),
            data_dir: None,
            request_timeout_secs: 30,
            images: ImageConfig::default(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            poll_interval_ms: 250,
        }
    }
}

impl Config {
    /// Load the configuration and apply environment overrides.
    ///
    /// An explicitly named file must exist; the default one may not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit.map(Path::to_path_buf).or_else(env::config_path) {
            Some(path) => Self::from_file(&path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Config::default(),
            },
        };
        let config = config.with_overrides(env::api_origin(), env::data_dir());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Replace the origin and data directory where an override is given.
    pub fn with_overrides(mut self, api_origin: Option<String>, data_dir: Option<PathBuf>) -> Self {
        if let Some(origin) = api_origin {
            self.api_origin = origin;
        }
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_origin.starts_with("http://") || self.api_origin.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api_origin must be an http(s) URL, got '{}'",
                self.api_origin
            )));
        }
        if self.images.batch_size == 0 {
            return Err(Error::Config("images.batch_size must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// File holding the durable session tokens.
    pub fn session_path(&self) -> PathBuf {
        self.data_dir().join(SESSION_FILE_NAME)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.images.poll_interval_ms)
    }
}

/// `<config dir>/wisssh/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `<data dir>/wisssh`, falling back to the working directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
