//! Review snapshots
//!
//! A snapshot is the minimal state needed to tell whether a platform's review
//! state moved between two runs. Each platform has its own release type so
//! that comparisons can only ever happen within one platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Platform;

/// A release type that can be compared against its previous run
///
/// Implemented once per platform. The classifier is generic over this trait,
/// which keeps an App Store release from being compared to a Google Play one.
pub trait TrackedRelease {
    /// Platform this release belongs to
    const PLATFORM: Platform;

    /// Raw vendor status string
    fn status(&self) -> &str;

    /// Whether `self` differs from `previous` in version (or build, where tracked)
    fn differs_from(&self, previous: &Self) -> bool;

    /// Version as shown to humans (e.g. `1.2.3 (100)`)
    fn display_version(&self) -> String;
}

/// Latest App Store Connect version state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreRelease {
    /// App Store Connect app ID
    #[serde(default)]
    pub app_id: String,
    /// Marketing version string, e.g. `1.2.3`
    pub version: String,
    /// Build number attached to the version, if known
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub build_number: Option<String>,
    /// `appStoreState` value, e.g. `READY_FOR_SALE`
    pub status: String,
}

impl AppStoreRelease {
    /// Create a release record
    #[must_use]
    pub fn new(version: &str, build_number: Option<&str>, status: &str) -> Self {
        Self {
            app_id: String::new(),
            version: version.to_string(),
            build_number: build_number.filter(|b| !b.is_empty()).map(String::from),
            status: status.to_string(),
        }
    }

    /// Set the app ID
    #[must_use]
    pub fn with_app_id(mut self, app_id: &str) -> Self {
        self.app_id = app_id.to_string();
        self
    }
}

impl TrackedRelease for AppStoreRelease {
    const PLATFORM: Platform = Platform::AppStore;

    fn status(&self) -> &str {
        &self.status
    }

    fn differs_from(&self, previous: &Self) -> bool {
        if self.version != previous.version {
            return true;
        }
        // A missing current build never counts as a change on its own
        match self.build_number.as_deref() {
            Some(build) if !build.is_empty() => previous.build_number.as_deref() != Some(build),
            _ => false,
        }
    }

    fn display_version(&self) -> String {
        match self.build_number.as_deref() {
            Some(build) if !build.is_empty() => format!("{} ({build})", self.version),
            _ => self.version.clone(),
        }
    }
}

/// Latest Google Play production track state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePlayRelease {
    /// Application package name
    #[serde(default)]
    pub package_name: String,
    /// Monotonically increasing version code
    pub version_code: i64,
    /// Optional marketing version name
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub version_name: Option<String>,
    /// Release status, e.g. `completed`, `inProgress`, `halted`
    pub status: String,
}

impl GooglePlayRelease {
    /// Create a release record
    #[must_use]
    pub fn new(version_code: i64, status: &str) -> Self {
        Self {
            package_name: String::new(),
            version_code,
            version_name: None,
            status: status.to_string(),
        }
    }

    /// Set the package name
    #[must_use]
    pub fn with_package_name(mut self, package_name: &str) -> Self {
        self.package_name = package_name.to_string();
        self
    }
}

impl TrackedRelease for GooglePlayRelease {
    const PLATFORM: Platform = Platform::GooglePlay;

    fn status(&self) -> &str {
        &self.status
    }

    fn differs_from(&self, previous: &Self) -> bool {
        self.version_code != previous.version_code
    }

    fn display_version(&self) -> String {
        self.version_code.to_string()
    }
}

/// A newly observed snapshot for one platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewSnapshot {
    /// App Store Connect observation
    AppStore(AppStoreRelease),
    /// Google Play observation
    GooglePlay(GooglePlayRelease),
}

impl ReviewSnapshot {
    /// Platform this snapshot was taken from
    #[must_use]
    pub const fn platform(&self) -> Platform {
        match self {
            Self::AppStore(_) => Platform::AppStore,
            Self::GooglePlay(_) => Platform::GooglePlay,
        }
    }

    /// Raw vendor status
    #[must_use]
    pub fn status(&self) -> &str {
        match self {
            Self::AppStore(r) => r.status(),
            Self::GooglePlay(r) => r.status(),
        }
    }

    /// Human-joined version
    #[must_use]
    pub fn display_version(&self) -> String {
        match self {
            Self::AppStore(r) => r.display_version(),
            Self::GooglePlay(r) => r.display_version(),
        }
    }
}

/// The persisted "last known state" for all platforms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    /// When the run that wrote this record happened
    pub last_checked: DateTime<Utc>,
    /// Last observed App Store state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store: Option<AppStoreRelease>,
    /// Last observed Google Play state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_play: Option<GooglePlayRelease>,
}

impl SnapshotRecord {
    /// An empty record stamped with `last_checked`
    #[must_use]
    pub const fn new(last_checked: DateTime<Utc>) -> Self {
        Self {
            last_checked,
            app_store: None,
            google_play: None,
        }
    }

    /// Store `snapshot` in the slot for its platform
    pub fn insert(&mut self, snapshot: ReviewSnapshot) {
        match snapshot {
            ReviewSnapshot::AppStore(r) => self.app_store = Some(r),
            ReviewSnapshot::GooglePlay(r) => self.google_play = Some(r),
        }
    }

    /// Whether an entry exists for `platform`
    #[must_use]
    pub const fn contains(&self, platform: Platform) -> bool {
        match platform {
            Platform::AppStore => self.app_store.is_some(),
            Platform::GooglePlay => self.google_play.is_some(),
        }
    }

    /// Stored status for `platform`, if any
    #[must_use]
    pub fn status(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::AppStore => self.app_store.as_ref().map(|r| r.status.as_str()),
            Platform::GooglePlay => self.google_play.as_ref().map(|r| r.status.as_str()),
        }
    }

    /// Copy the entry for `platform` from `other` into `self`
    pub fn carry_over(&mut self, other: &Self, platform: Platform) {
        match platform {
            Platform::AppStore => self.app_store.clone_from(&other.app_store),
            Platform::GooglePlay => self.google_play.clone_from(&other.google_play),
        }
    }

    /// Whether no platform has an entry
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.app_store.is_none() && self.google_play.is_none()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
