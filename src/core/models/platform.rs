//! Tracked store platforms
//!
//! Each platform has its own versioning scheme and status vocabulary.

use serde::{Deserialize, Serialize};

/// A store whose review pipeline is monitored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    /// App Store Connect - versions by label plus build number
    AppStore,
    /// Google Play Console - versions by integer version code
    GooglePlay,
}

impl Platform {
    /// All platforms, in evaluation order
    pub const ALL: [Self; 2] = [Self::AppStore, Self::GooglePlay];

    /// Key used for this platform in persisted and observed JSON documents
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::AppStore => "appStore",
            Self::GooglePlay => "googlePlay",
        }
    }

    /// Human-readable platform name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AppStore => "App Store",
            Self::GooglePlay => "Google Play",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "appstore" | "ios" => Ok(Self::AppStore),
            "googleplay" | "android" | "play" => Ok(Self::GooglePlay),
            _ => Err(format!("Unknown platform: {s}. Use 'app-store' or 'google-play'")),
        }
    }
}
