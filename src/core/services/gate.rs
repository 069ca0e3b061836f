//! Notification gate
//!
//! Only terminal or otherwise interesting statuses are worth a message.
//! Intermediate states such as `IN_REVIEW` never notify, however much else
//! changed.

use crate::core::models::{Platform, StatusVocabulary};

/// Whether `status` on `platform` is one humans should hear about
///
/// Depends on the current status alone; history plays no part.
#[must_use]
pub fn should_send_notification(platform: Platform, status: &str) -> bool {
    StatusVocabulary::for_platform(platform).is_notify_worthy(status)
}
