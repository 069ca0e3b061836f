//! Store status vocabularies
//!
//! Vendor statuses are matched case-insensitively by substring, so
//! `METADATA_REJECTED` counts as both "rejected" and "metadata rejected".
//! All matching goes through [`StatusVocabulary`] so callers never touch the
//! raw lists.

use super::Platform;

const APP_STORE_NOTIFY: &[&str] = &[
    "pending_developer_release",
    "pending_apple_release",
    "ready_for_sale",
    "rejected",
    "metadata_rejected",
    "invalid_binary",
];

const GOOGLE_PLAY_NOTIFY: &[&str] = &["completed"];

const REJECTION: &[&str] = &["rejected", "metadata_rejected", "invalid_binary", "halted"];

const APPROVAL: &[&str] = &["ready_for_sale", "pending_developer_release", "completed"];

/// Status substrings that classify a platform's statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusVocabulary {
    notify: &'static [&'static str],
    rejection: &'static [&'static str],
    approval: &'static [&'static str],
}

impl StatusVocabulary {
    /// Vocabulary for `platform`
    #[must_use]
    pub const fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::AppStore => Self {
                notify: APP_STORE_NOTIFY,
                rejection: REJECTION,
                approval: APPROVAL,
            },
            Platform::GooglePlay => Self {
                notify: GOOGLE_PLAY_NOTIFY,
                rejection: REJECTION,
                approval: APPROVAL,
            },
        }
    }

    /// Terminal or otherwise interesting status
    #[must_use]
    pub fn is_notify_worthy(&self, status: &str) -> bool {
        contains_any(status, self.notify)
    }

    /// Rejection-class status
    #[must_use]
    pub fn is_rejection(&self, status: &str) -> bool {
        contains_any(status, self.rejection)
    }

    /// Approval-class status
    #[must_use]
    pub fn is_approval(&self, status: &str) -> bool {
        contains_any(status, self.approval)
    }

    /// A rejection-class `previous` followed by an approval-class `current`
    #[must_use]
    pub fn recovered(&self, previous: &str, current: &str) -> bool {
        self.is_rejection(previous) && self.is_approval(current)
    }
}

fn contains_any(status: &str, needles: &[&str]) -> bool {
    let status = status.to_lowercase();
    needles.iter().any(|needle| status.contains(needle))
}

/// Coarse tone of a status, used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Approved or live
    Approved,
    /// Rejected or invalid
    Rejected,
    /// Still moving through review or processing
    InProgress,
    /// Anything else
    Other,
}

impl StatusTone {
    /// Classify a raw status
    #[must_use]
    pub fn of(status: &str) -> Self {
        let status = status.to_lowercase();
        let has = |needle: &str| status.contains(needle);

        if has("approved") || has("ready_for_sale") || has("completed") || has("pending_developer_release")
        {
            Self::Approved
        } else if has("rejected") || has("invalid") {
            Self::Rejected
        } else if has("in_review") || has("processing") {
            Self::InProgress
        } else {
            Self::Other
        }
    }
}

/// Turn `READY_FOR_SALE` into `Ready For Sale`
#[must_use]
pub fn format_status(status: &str) -> String {
    status
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
