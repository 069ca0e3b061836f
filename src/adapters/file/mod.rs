//! File-based snapshot storage
//!
//! Implements `SnapshotStore` using a JSON file that is replaced atomically.

mod store;

pub use store::JsonSnapshotStore;
