//! CLI configuration
//!
//! Read from TOML. Every key is optional:
//!
//! ```toml
//! data_file = "risks.json"
//! currency = "Mio. EUR"
//! log_level = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "riskreg.toml";

/// Errors while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for [`RegisterConfig`]
    #[error("invalid config {path}: {source}")]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// Register configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    /// JSON store read and written by every command
    pub data_file: PathBuf,
    /// Currency label shown next to impact and budget amounts
    pub currency: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("risks.json"),
            currency: "Mio. EUR".to_string(),
            log_level: "warn".to_string(),
            source: None,
        }
    }
}

impl RegisterConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With data file
    #[inline]
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// With currency label
    #[inline]
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// File this configuration was read from, `None` for defaults
    #[inline]
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns the TOML error for malformed input or wrongly typed keys
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read a config file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Resolve the configuration for a run
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// `dir` is used when present, otherwise defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a chosen file cannot be read or parsed
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }
}
