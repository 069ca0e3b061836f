//! Classify command - evaluate the status predicates for one transition

use anyhow::anyhow;

use store_review_monitor::core::models::{Platform, StatusVocabulary};
use store_review_monitor::core::services::should_send_notification;
use store_review_monitor::output::{ClassifyResult, OutputMode};

/// Classify `status` (and optionally the transition from `previous_status`)
pub fn classify(
    platform: &str,
    status: &str,
    previous_status: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let platform: Platform = platform.parse().map_err(|e: String| anyhow!(e))?;
    let vocabulary = StatusVocabulary::for_platform(platform);

    let recovered_from_rejection =
        previous_status.is_some_and(|previous| vocabulary.recovered(previous, status));

    ClassifyResult {
        platform,
        status: status.to_string(),
        previous_status: previous_status.map(String::from),
        should_notify: should_send_notification(platform, status),
        recovered_from_rejection,
    }
    .render(mode);
    Ok(())
}
