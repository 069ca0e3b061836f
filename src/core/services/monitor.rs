//! Run orchestrator - one monitoring pass over every platform
//!
//! Loads the previous snapshot, evaluates each platform the source can
//! report on, hands notifications to the notifier and commits the new
//! snapshot exactly once. No failure in here aborts the run: fetch, delivery
//! and persistence problems are logged and reported back in [`RunReport`].

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::classifier::{has_recovered_from_rejection, has_version_or_build_changed};
use super::gate::should_send_notification;
use crate::core::models::{
    ChangeVerdict, Notification, Platform, ReviewSnapshot, SnapshotRecord, TrackedRelease,
};
use crate::core::ports::{LoadedSnapshot, Notifier, SnapshotStore, SourceError, StatusSource};

/// What happens to a stored platform entry when a run does not observe it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    /// Keep the last known entry so one failed fetch does not reset history
    #[default]
    CarryForward,
    /// Write only what this run observed
    Drop,
}

impl std::str::FromStr for RetentionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "carry_forward" | "keep" => Ok(Self::CarryForward),
            "drop" => Ok(Self::Drop),
            _ => Err(format!("Unknown retention policy: {s}. Use 'carry_forward' or 'drop'")),
        }
    }
}

/// How the previous snapshot looked when the run started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorState {
    /// A record was loaded
    Found,
    /// No record existed
    Missing,
    /// A record existed but could not be read
    Unreadable(String),
}

impl From<&LoadedSnapshot> for PriorState {
    fn from(loaded: &LoadedSnapshot) -> Self {
        match loaded {
            LoadedSnapshot::Found(_) => Self::Found,
            LoadedSnapshot::Missing => Self::Missing,
            LoadedSnapshot::Unreadable(reason) => Self::Unreadable(reason.clone()),
        }
    }
}

/// Whether a notification left the building
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The verdict did not call for one
    Skipped,
    /// Handed to the notifier successfully
    Sent,
    /// The notifier failed
    Failed(String),
}

/// Evaluation of one observed platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Human-joined current version
    pub version: String,
    /// Current raw status
    pub status: String,
    /// Status stored by the previous run
    pub previous_status: Option<String>,
    /// Classifier and gate output
    pub verdict: ChangeVerdict,
    /// What happened to the notification
    pub delivery: Delivery,
}

/// Per-platform result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Current data was available and evaluated
    Evaluated(Evaluation),
    /// The platform has no release to report
    NoData,
    /// Monitoring for the platform is not set up
    NotConfigured,
    /// Fetching failed
    FetchFailed(String),
}

/// A platform paired with its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformOutcome {
    /// The platform
    pub platform: Platform,
    /// What happened to it this run
    pub outcome: Outcome,
}

impl PlatformOutcome {
    /// Whether a notification was delivered for this platform
    #[must_use]
    pub fn notified(&self) -> bool {
        matches!(
            &self.outcome,
            Outcome::Evaluated(Evaluation {
                delivery: Delivery::Sent,
                ..
            })
        )
    }

    /// Current status, when the platform was observed
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Evaluated(evaluation) => Some(&evaluation.status),
            _ => None,
        }
    }
}

/// Everything a run decided and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// When the run happened
    pub checked_at: DateTime<Utc>,
    /// State of the snapshot at the start of the run
    pub prior: PriorState,
    /// Outcome per platform, in evaluation order
    pub platforms: Vec<PlatformOutcome>,
    /// Whether any notification was delivered
    pub notification_sent: bool,
    /// Whether the new snapshot was written
    pub persisted: bool,
    /// The record committed (or attempted) at the end of the run
    pub record: SnapshotRecord,
}

impl RunReport {
    /// Outcome for `platform`
    #[must_use]
    pub fn outcome(&self, platform: Platform) -> Option<&Outcome> {
        self.platforms.iter().find(|p| p.platform == platform).map(|p| &p.outcome)
    }
}

/// One-run monitor over injected collaborators
pub struct Monitor<'a> {
    store: &'a dyn SnapshotStore,
    source: &'a dyn StatusSource,
    notifier: &'a dyn Notifier,
    retention: RetentionPolicy,
}

impl std::fmt::Debug for Monitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor").field("retention", &self.retention).finish_non_exhaustive()
    }
}

impl<'a> Monitor<'a> {
    /// Create a monitor with the default retention policy
    #[must_use]
    pub fn new(
        store: &'a dyn SnapshotStore,
        source: &'a dyn StatusSource,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            store,
            source,
            notifier,
            retention: RetentionPolicy::default(),
        }
    }

    /// Set the retention policy for unobserved platforms
    #[must_use]
    pub const fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Run one monitoring pass now
    pub fn run(&self) -> RunReport {
        self.run_at(Utc::now())
    }

    /// Run one monitoring pass stamped with `now`
    pub fn run_at(&self, now: DateTime<Utc>) -> RunReport {
        let loaded = self.store.load();
        let prior = PriorState::from(&loaded);
        match &loaded {
            LoadedSnapshot::Found(record) => {
                debug!("Loaded snapshot from {}", record.last_checked.to_rfc3339());
            },
            LoadedSnapshot::Missing => info!("No previous snapshot found, starting cold"),
            LoadedSnapshot::Unreadable(reason) => {
                warn!("Previous snapshot unreadable, starting cold: {reason}");
            },
        }
        let previous = loaded.into_record();

        let mut next = SnapshotRecord::new(now);
        let mut platforms = Vec::with_capacity(Platform::ALL.len());

        for platform in Platform::ALL {
            let outcome = self.observe(platform, previous.as_ref(), &mut next, now);

            if !next.contains(platform)
                && self.retention == RetentionPolicy::CarryForward
                && let Some(previous) = &previous
                && previous.contains(platform)
            {
                debug!("Carrying forward last known {platform} snapshot");
                next.carry_over(previous, platform);
            }

            platforms.push(PlatformOutcome { platform, outcome });
        }

        let persisted = match self.store.save(&next) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to save snapshot: {err}");
                false
            },
        };

        let notification_sent = platforms.iter().any(PlatformOutcome::notified);

        RunReport {
            checked_at: now,
            prior,
            platforms,
            notification_sent,
            persisted,
            record: next,
        }
    }

    fn observe(
        &self,
        platform: Platform,
        previous: Option<&SnapshotRecord>,
        next: &mut SnapshotRecord,
        now: DateTime<Utc>,
    ) -> Outcome {
        match self.source.fetch(platform) {
            Ok(Some(snapshot)) if snapshot.platform() != platform => {
                warn!("Source returned {} data when asked for {platform}", snapshot.platform());
                Outcome::FetchFailed(format!("source returned {} data", snapshot.platform()))
            },
            Ok(Some(snapshot)) => {
                info!("{platform} status: {}", snapshot.status());
                let evaluation = self.evaluate(&snapshot, previous, now);
                next.insert(snapshot);
                Outcome::Evaluated(evaluation)
            },
            Ok(None) => {
                info!("No {platform} review information available");
                Outcome::NoData
            },
            Err(SourceError::NotConfigured(_)) => {
                info!("Skipping {platform} monitoring (missing configuration)");
                Outcome::NotConfigured
            },
            Err(err) => {
                warn!("Failed to monitor {platform}: {err}");
                Outcome::FetchFailed(err.to_string())
            },
        }
    }

    fn evaluate(
        &self,
        snapshot: &ReviewSnapshot,
        previous: Option<&SnapshotRecord>,
        now: DateTime<Utc>,
    ) -> Evaluation {
        let platform = snapshot.platform();
        let verdict = match snapshot {
            ReviewSnapshot::AppStore(current) => {
                verdict_for(current, previous.and_then(|p| p.app_store.as_ref()))
            },
            ReviewSnapshot::GooglePlay(current) => {
                verdict_for(current, previous.and_then(|p| p.google_play.as_ref()))
            },
        };
        let previous_status = previous.and_then(|p| p.status(platform)).map(String::from);
        let version = snapshot.display_version();
        let status = snapshot.status().to_string();

        let delivery = if verdict.fires() {
            let notification = Notification {
                platform,
                version: version.clone(),
                current_status: status.clone(),
                previous_status: previous_status.clone(),
                recovered_from_rejection: verdict.recovered_from_rejection,
                checked_at: now,
            };
            self.deliver(&notification)
        } else if !verdict.changed && !verdict.recovered_from_rejection {
            info!(
                "{platform} version/build has not changed and not recovered from rejection, \
                 skipping notification"
            );
            Delivery::Skipped
        } else {
            info!("{platform} status {status} does not require notification");
            Delivery::Skipped
        };

        Evaluation {
            version,
            status,
            previous_status,
            verdict,
            delivery,
        }
    }

    fn deliver(&self, notification: &Notification) -> Delivery {
        let platform = notification.platform;
        match self.notifier.deliver(notification) {
            Ok(()) => {
                if notification.recovered_from_rejection {
                    info!(
                        "Sent {platform} notification (recovered from rejection: {} -> {})",
                        notification.previous_status.as_deref().unwrap_or_default(),
                        notification.current_status
                    );
                } else {
                    info!("Sent {platform} notification (version/build changed)");
                }
                Delivery::Sent
            },
            Err(err) => {
                warn!("Failed to deliver {platform} notification: {err}");
                Delivery::Failed(err.to_string())
            },
        }
    }
}

fn verdict_for<R: TrackedRelease>(current: &R, previous: Option<&R>) -> ChangeVerdict {
    ChangeVerdict {
        changed: has_version_or_build_changed(current, previous),
        recovered_from_rejection: has_recovered_from_rejection(current.status(), previous),
        should_notify: should_send_notification(R::PLATFORM, current.status()),
    }
}
