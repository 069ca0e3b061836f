//! Change classifier - decides whether a platform's state moved
//!
//! Pure functions over a current release and the release stored by the
//! previous run. Both arguments share one release type, so a snapshot is only
//! ever compared with a snapshot from the same platform.

use crate::core::models::{StatusVocabulary, TrackedRelease};

/// Whether the version (or build, where tracked) changed since last run
///
/// A missing previous release is a cold start and always counts as changed.
#[must_use]
pub fn has_version_or_build_changed<R: TrackedRelease>(current: &R, previous: Option<&R>) -> bool {
    previous.is_none_or(|previous| current.differs_from(previous))
}

/// Whether the platform went from a rejection to an approval
///
/// Without a previous release there is nothing to recover from.
#[must_use]
pub fn has_recovered_from_rejection<R: TrackedRelease>(
    current_status: &str,
    previous: Option<&R>,
) -> bool {
    let Some(previous) = previous else {
        return false;
    };

    StatusVocabulary::for_platform(R::PLATFORM).recovered(previous.status(), current_status)
}
