//! Command implementations

mod classify;
mod run;
mod snapshot;

pub use classify::classify;
pub use run::{RunArgs, run};
pub use snapshot::snapshot_cmd;
