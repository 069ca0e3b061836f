//! Centralized path definitions
//!
//! Single source of truth for the filesystem locations the monitor uses.
//!
//! ## Layout
//!
//! ```text
//! ./store-review.toml                      # Optional config, next to the pipeline
//! $STORE_REVIEW_CACHE_DIR/                 # Or the platform cache dir
//! └── store-review-versions.json           # Snapshot from the previous run
//! ```
//!
//! Without `STORE_REVIEW_CACHE_DIR` the snapshot lives under
//! `<cache dir>/store-review-monitor/`, falling back to the system temp dir
//! when no cache dir is known.

use std::path::PathBuf;

/// Config filename looked up in the working directory
pub const CONFIG_FILE: &str = "store-review.toml";

/// Snapshot filename
pub const CACHE_FILE: &str = "store-review-versions.json";

/// Environment variable overriding the snapshot directory
pub const CACHE_DIR_ENV: &str = "STORE_REVIEW_CACHE_DIR";

const APP_DIR: &str = "store-review-monitor";

/// Get path to the default config file.
#[must_use]
pub fn default_config() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

/// Get the directory holding the snapshot.
#[must_use]
pub fn cache_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CACHE_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::cache_dir().map_or_else(std::env::temp_dir, |dir| dir.join(APP_DIR))
}

/// Get path to the default snapshot file.
#[must_use]
pub fn default_cache_path() -> PathBuf {
    cache_dir().join(CACHE_FILE)
}
