//! Status source port
//!
//! The vendor API clients live outside the core. They hand over one
//! [`ReviewSnapshot`] per platform, or explain why they could not.

use thiserror::Error;

use super::super::models::{Platform, ReviewSnapshot};

/// Why a platform's current state is not available
#[derive(Debug, Error)]
pub enum SourceError {
    /// Monitoring for this platform is not set up
    #[error("{0} monitoring is not configured")]
    NotConfigured(Platform),

    /// The vendor could not be reached or refused the request
    #[error("{platform} unavailable: {reason}")]
    Unavailable {
        /// Platform that failed
        platform: Platform,
        /// Error reported by the fetcher
        reason: String,
    },

    /// Data came back but did not have the expected shape
    #[error("malformed {platform} data: {reason}")]
    Malformed {
        /// Platform whose data was malformed
        platform: Platform,
        /// What was wrong with it
        reason: String,
    },

    /// Local I/O failure while reading fetched data
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Provider of the current review state per platform
pub trait StatusSource {
    /// Fetch the current state of `platform`
    ///
    /// `Ok(None)` means the platform answered but has no release to report.
    fn fetch(&self, platform: Platform) -> Result<Option<ReviewSnapshot>, SourceError>;
}
