//! Monitor configuration
//!
//! One explicit value per invocation, loaded from `store-review.toml`
//! (or `--config`) and overridden by command-line flags. Nothing here is
//! process-global.
//!
//! ```toml
//! cache_path = "/bitrise/cache/store-review-versions.json"
//! retention = "carry_forward"
//!
//! [app_store]
//! app_id = "1234567890"
//!
//! [google_play]
//! package_name = "com.example.app"
//!
//! [notifications]
//! outbox = "notifications.jsonl"
//!
//! [outputs]
//! path = "outputs.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::services::RetentionPolicy;
use crate::paths;

/// Errors from loading the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid TOML for this config
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Config path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },
}

/// Monitor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Snapshot file; defaults to [`paths::default_cache_path`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_path: Option<PathBuf>,
    /// What to do with platforms a run did not observe
    #[serde(default)]
    pub retention: RetentionPolicy,
    /// App Store Connect settings
    #[serde(default)]
    pub app_store: AppStoreConfig,
    /// Google Play settings
    #[serde(default)]
    pub google_play: GooglePlayConfig,
    /// Notification destination
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Step outputs export
    #[serde(default)]
    pub outputs: OutputsConfig,
}

/// App Store Connect settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStoreConfig {
    /// App ID recorded with App Store snapshots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

/// Google Play settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GooglePlayConfig {
    /// Package name recorded with Google Play snapshots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
}

/// Notification destination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// JSON-lines outbox file, or `-` for stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbox: Option<PathBuf>,
}

/// Step outputs export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputsConfig {
    /// JSON file the outputs are merged into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl MonitorConfig {
    /// Load config from `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `explicit` if given, else the default config file if present,
    /// else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default = paths::default_config();
        if default.exists() {
            log::debug!("Loading config from {}", default.display());
            Self::load(&default)
        } else {
            Ok(Self::default())
        }
    }

    /// Snapshot file to use
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.cache_path.clone().unwrap_or_else(paths::default_cache_path)
    }
}
