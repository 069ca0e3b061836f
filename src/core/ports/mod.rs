//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the decision core and the
//! systems around it (vendor APIs, chat delivery, durable storage).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core depends only on these traits, never on concrete implementations.
//! Each run gets its ports passed in explicitly, so tests can substitute
//! in-memory versions.

mod notifier;
mod snapshot_store;
mod status_source;

pub use notifier::{DeliveryError, Notifier};
pub use snapshot_store::{LoadedSnapshot, SnapshotStore, StoreError};
pub use status_source::{SourceError, StatusSource};
