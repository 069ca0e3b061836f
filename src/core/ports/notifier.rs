//! Notifier port
//!
//! Message rendering and chat delivery are handled elsewhere; the core only
//! hands over a [`Notification`] record.

use thiserror::Error;

use super::super::models::Notification;

/// Errors from handing a notification to the delivery side
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Filesystem or stream failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Notification could not be encoded
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Delivery side refused the notification
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

/// Sink for notifications
pub trait Notifier {
    /// Deliver one notification
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}
