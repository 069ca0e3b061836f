//! Business logic services
//!
//! Decision logic over domain models. The classifier and gate are pure
//! functions; the monitor drives them through the port traits.
//!
//! - [`classifier`] - Did the version, build or rejection state change?
//! - [`gate`] - Is the current status worth a notification?
//! - [`monitor`] - One run across all platforms

pub mod classifier;
pub mod gate;
pub mod monitor;

pub use classifier::{has_recovered_from_rejection, has_version_or_build_changed};
pub use gate::should_send_notification;
pub use monitor::{
    Delivery, Evaluation, Monitor, Outcome, PlatformOutcome, PriorState, RetentionPolicy,
    RunReport,
};
