//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{
    ChangeVerdict, Platform, SnapshotRecord, StatusTone, TrackedRelease, format_status,
};
use crate::core::services::{Delivery, Outcome, PriorState, RunReport};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a monitoring run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// When the run happened (RFC3339)
    pub checked_at: String,
    /// Snapshot file used
    pub cache_path: String,
    /// State of the previous snapshot: found, missing, unreadable
    pub prior: String,
    /// Why the previous snapshot could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_error: Option<String>,
    /// Per-platform results
    pub platforms: Vec<PlatformSummary>,
    /// Whether any notification was delivered
    pub notification_sent: bool,
    /// Whether the new snapshot was written
    pub persisted: bool,
}

/// Result for one platform
#[derive(Debug, Serialize)]
pub struct PlatformSummary {
    /// Platform key (appStore, googlePlay)
    pub platform: Platform,
    /// What happened to the platform this run
    pub outcome: OutcomeKind,
    /// Human-joined version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Current status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Previous status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<String>,
    /// Classifier and gate output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<ChangeVerdict>,
    /// What happened to the notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryKind>,
    /// Fetch or delivery error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-platform outcome, as reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Current data was evaluated
    Evaluated,
    /// No release to report
    NoData,
    /// Monitoring not set up
    NotConfigured,
    /// Fetching failed
    FetchFailed,
}

/// Notification delivery, as reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryKind {
    /// Not called for
    Skipped,
    /// Delivered
    Sent,
    /// The notifier failed
    Failed,
}

impl RunSummary {
    /// Summarize `report`
    #[must_use]
    pub fn new(report: &RunReport, cache_path: &str) -> Self {
        let (prior, prior_error) = match &report.prior {
            PriorState::Found => ("found", None),
            PriorState::Missing => ("missing", None),
            PriorState::Unreadable(reason) => ("unreadable", Some(reason.clone())),
        };

        Self {
            checked_at: report.checked_at.to_rfc3339(),
            cache_path: cache_path.to_string(),
            prior: prior.to_string(),
            prior_error,
            platforms: report
                .platforms
                .iter()
                .map(|p| PlatformSummary::new(p.platform, &p.outcome))
                .collect(),
            notification_sent: report.notification_sent,
            persisted: report.persisted,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if let Some(reason) = &self.prior_error {
            println!("{} previous snapshot unreadable ({reason}), started cold\n", "!".yellow());
        } else if self.prior == "missing" {
            println!("No previous snapshot, started cold\n");
        }

        for p in &self.platforms {
            let name = p.platform.display_name().bold();
            match p.outcome {
                OutcomeKind::Evaluated => {
                    let status = p.status.as_deref().unwrap_or_default();
                    println!("{name}  {}  {}", p.version.as_deref().unwrap_or_default(), tone(status));
                    if let Some(previous) = &p.previous_status {
                        println!("          was {}", format_status(previous));
                    }
                    match p.delivery {
                        Some(DeliveryKind::Sent) => println!("          {}", "notified".green()),
                        Some(DeliveryKind::Failed) => println!(
                            "          {} {}",
                            "notification failed:".red(),
                            p.error.as_deref().unwrap_or_default()
                        ),
                        Some(DeliveryKind::Skipped) | None => println!("          no notification"),
                    }
                },
                OutcomeKind::NoData => println!("{name}  no review information available"),
                OutcomeKind::NotConfigured => println!("{name}  skipped (not configured)"),
                OutcomeKind::FetchFailed => println!(
                    "{name}  {} {}",
                    "fetch failed:".red(),
                    p.error.as_deref().unwrap_or_default()
                ),
            }
            println!();
        }

        if self.persisted {
            println!("Snapshot saved to {}", self.cache_path);
        } else {
            println!("{} snapshot could not be saved to {}", "!".yellow(), self.cache_path);
        }
        println!("Notification sent: {}", self.notification_sent);
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl PlatformSummary {
    fn new(platform: Platform, outcome: &Outcome) -> Self {
        let mut summary = Self {
            platform,
            outcome: OutcomeKind::Evaluated,
            version: None,
            status: None,
            previous_status: None,
            verdict: None,
            delivery: None,
            error: None,
        };

        match outcome {
            Outcome::Evaluated(evaluation) => {
                summary.version = Some(evaluation.version.clone());
                summary.status = Some(evaluation.status.clone());
                summary.previous_status.clone_from(&evaluation.previous_status);
                summary.verdict = Some(evaluation.verdict);
                let delivery = match &evaluation.delivery {
                    Delivery::Skipped => DeliveryKind::Skipped,
                    Delivery::Sent => DeliveryKind::Sent,
                    Delivery::Failed(reason) => {
                        summary.error = Some(reason.clone());
                        DeliveryKind::Failed
                    },
                };
                summary.delivery = Some(delivery);
            },
            Outcome::NoData => summary.outcome = OutcomeKind::NoData,
            Outcome::NotConfigured => summary.outcome = OutcomeKind::NotConfigured,
            Outcome::FetchFailed(reason) => {
                summary.outcome = OutcomeKind::FetchFailed;
                summary.error = Some(reason.clone());
            },
        }

        summary
    }
}

/// Stored snapshot, as shown by `snapshot show`
#[derive(Debug, Serialize)]
pub struct SnapshotView {
    /// Snapshot file
    pub path: String,
    /// found, missing, unreadable
    pub state: String,
    /// Why the file could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The stored record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<SnapshotRecord>,
}

impl SnapshotView {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Snapshot: {}", self.path);
        let Some(record) = &self.record else {
            match &self.error {
                Some(reason) => println!("Unreadable: {reason}"),
                None => println!("No snapshot stored yet."),
            }
            return;
        };

        println!("Last checked: {}\n", record.last_checked.to_rfc3339());
        match &record.app_store {
            Some(r) => println!(
                "  {}  {}  {}",
                Platform::AppStore.display_name().bold(),
                r.display_version(),
                tone(&r.status)
            ),
            None => println!("  {}  (none)", Platform::AppStore.display_name().bold()),
        }
        match &record.google_play {
            Some(r) => println!(
                "  {}  {}  {}",
                Platform::GooglePlay.display_name().bold(),
                r.version_code,
                tone(&r.status)
            ),
            None => println!("  {}  (none)", Platform::GooglePlay.display_name().bold()),
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Result of classifying a status transition
#[derive(Debug, Serialize)]
pub struct ClassifyResult {
    /// Platform the statuses belong to
    pub platform: Platform,
    /// Current status
    pub status: String,
    /// Previous status, if given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<String>,
    /// Current status is notify-worthy
    pub should_notify: bool,
    /// Previous status was a rejection and the current one an approval
    pub recovered_from_rejection: bool,
}

impl ClassifyResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("{}: {}", self.platform.display_name().bold(), tone(&self.status));
                println!("  notify-worthy:           {}", self.should_notify);
                if let Some(previous) = &self.previous_status {
                    println!("  previous:                {}", format_status(previous));
                }
                println!("  recovered from rejection: {}", self.recovered_from_rejection);
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

fn tone(status: &str) -> colored::ColoredString {
    let text = format_status(status);
    match StatusTone::of(status) {
        StatusTone::Approved => text.green(),
        StatusTone::Rejected => text.red(),
        StatusTone::InProgress => text.yellow(),
        StatusTone::Other => text.normal(),
    }
}
