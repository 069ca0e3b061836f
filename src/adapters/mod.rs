//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `file/` - JSON file snapshot store
//! - `observation/` - Status source reading the fetchers' observation document
//! - `notify/` - Notification sinks (console, JSON-lines outbox)
//! - `outputs` - CI step outputs export

pub mod file;
pub mod notify;
pub mod observation;
pub mod outputs;

pub use file::JsonSnapshotStore;
pub use notify::{ConsoleNotifier, ConsoleStream, Destination, OutboxNotifier};
pub use observation::ObservationFile;
