//! Core domain logic for store review monitoring
//!
//! This module contains the change-detection and notification decisions
//! with no I/O dependencies. All external interactions are abstracted
//! through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Platform, ReviewSnapshot, SnapshotRecord, ChangeVerdict)
//! - `services/` - Classifier, notification gate and run orchestration
//! - `ports/` - Trait definitions for the snapshot store, status source and notifier

pub mod models;
pub mod ports;
pub mod services;
