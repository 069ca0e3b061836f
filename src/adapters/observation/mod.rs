//! Observation file status source
//!
//! The vendor fetchers write what they saw into one JSON document keyed by
//! platform:
//!
//! ```json
//! {
//!   "appStore":   { "version": "1.2.3", "buildNumber": "100", "status": "READY_FOR_SALE" },
//!   "googlePlay": { "error": "403 Forbidden" }
//! }
//! ```
//!
//! A missing key means the platform is not configured, `null` means the
//! platform has nothing to report, and an object with an `error` field is a
//! failed fetch.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::models::{AppStoreRelease, GooglePlayRelease, Platform, ReviewSnapshot};
use crate::core::ports::{SourceError, StatusSource};

/// Status source reading a fetcher's observation document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationFile {
    path: PathBuf,
    app_id: Option<String>,
    package_name: Option<String>,
}

impl ObservationFile {
    /// Source reading `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            app_id: None,
            package_name: None,
        }
    }

    /// App ID to fill in when an App Store observation omits it
    #[must_use]
    pub fn with_app_id(mut self, app_id: Option<String>) -> Self {
        self.app_id = app_id;
        self
    }

    /// Package name to fill in when a Google Play observation omits it
    #[must_use]
    pub fn with_package_name(mut self, package_name: Option<String>) -> Self {
        self.package_name = package_name;
        self
    }

    /// Path of the observation document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self, platform: Platform) -> Result<Map<String, Value>, SourceError> {
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(SourceError::Malformed {
                platform,
                reason: "observation document is not a JSON object".to_string(),
            }),
            Err(err) => Err(SourceError::Malformed {
                platform,
                reason: err.to_string(),
            }),
        }
    }
}

impl StatusSource for ObservationFile {
    fn fetch(&self, platform: Platform) -> Result<Option<ReviewSnapshot>, SourceError> {
        let document = self.read_document(platform)?;
        let Some(entry) = document.get(platform.key()) else {
            return Err(SourceError::NotConfigured(platform));
        };

        if entry.is_null() {
            return Ok(None);
        }

        if let Some(error) = entry.get("error") {
            return Err(SourceError::Unavailable {
                platform,
                reason: error.as_str().map_or_else(|| error.to_string(), String::from),
            });
        }

        let snapshot = match platform {
            Platform::AppStore => {
                let release: AppStoreRelease = parse_entry(platform, entry)?;
                match &self.app_id {
                    Some(app_id) if release.app_id.is_empty() => {
                        ReviewSnapshot::AppStore(release.with_app_id(app_id))
                    },
                    _ => ReviewSnapshot::AppStore(release),
                }
            },
            Platform::GooglePlay => {
                let release: GooglePlayRelease = parse_entry(platform, entry)?;
                match &self.package_name {
                    Some(package_name) if release.package_name.is_empty() => {
                        ReviewSnapshot::GooglePlay(release.with_package_name(package_name))
                    },
                    _ => ReviewSnapshot::GooglePlay(release),
                }
            },
        };

        Ok(Some(snapshot))
    }
}

fn parse_entry<T: DeserializeOwned>(platform: Platform, entry: &Value) -> Result<T, SourceError> {
    serde_json::from_value(entry.clone()).map_err(|err| SourceError::Malformed {
        platform,
        reason: err.to_string(),
    })
}
