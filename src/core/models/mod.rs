//! Domain models for store review monitoring
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Platform`] - Which store a snapshot came from
//! - [`ReviewSnapshot`] - "This is what the store looked like this run"
//! - [`SnapshotRecord`] - "This is what we saw last run"
//! - [`ChangeVerdict`] - Whether the difference is worth a notification
//! - [`StatusVocabulary`] - Status classification by substring

mod platform;
mod snapshot;
mod status;
mod verdict;

pub use platform::Platform;
pub use snapshot::{
    AppStoreRelease, GooglePlayRelease, ReviewSnapshot, SnapshotRecord, TrackedRelease,
};
pub use status::{StatusTone, StatusVocabulary, format_status};
pub use verdict::{ChangeVerdict, Notification};
