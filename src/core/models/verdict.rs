//! Classifier output and the notification it may produce

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Platform;

/// Per-platform decision for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeVerdict {
    /// Version or build moved since the last run (or there was no last run)
    pub changed: bool,
    /// Previous status was a rejection and the current one is an approval
    pub recovered_from_rejection: bool,
    /// Current status is one worth telling humans about
    pub should_notify: bool,
}

impl ChangeVerdict {
    /// Whether a notification should go out for this verdict
    #[must_use]
    pub const fn fires(&self) -> bool {
        (self.changed || self.recovered_from_rejection) && self.should_notify
    }
}

/// Record handed to the delivery collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Platform the change happened on
    pub platform: Platform,
    /// Human-joined version, e.g. `1.2.3 (100)`
    pub version: String,
    /// Status observed this run
    pub current_status: String,
    /// Status stored by the previous run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<String>,
    /// Whether this fired because of a rejection recovery
    #[serde(default)]
    pub recovered_from_rejection: bool,
    /// When the run observed the change
    pub checked_at: DateTime<Utc>,
}
