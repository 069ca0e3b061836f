//! Snapshot command - inspect or reset the stored snapshot

use std::path::Path;

use store_review_monitor::adapters::JsonSnapshotStore;
use store_review_monitor::config::MonitorConfig;
use store_review_monitor::core::ports::{LoadedSnapshot, SnapshotStore};
use store_review_monitor::output::{OperationResult, OutputMode, SnapshotView};

use crate::cli::SnapshotAction;

/// Handle snapshot subcommands
pub fn snapshot_cmd(
    config_path: Option<&Path>,
    action: SnapshotAction,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let config = MonitorConfig::load_or_default(config_path)?;

    match action {
        SnapshotAction::Show { cache } => {
            let store = JsonSnapshotStore::new(cache.unwrap_or_else(|| config.cache_path()));
            show(&store, mode);
            Ok(())
        },
        SnapshotAction::Clear { cache } => {
            let store = JsonSnapshotStore::new(cache.unwrap_or_else(|| config.cache_path()));
            clear(&store, mode)
        },
    }
}

fn show(store: &JsonSnapshotStore, mode: OutputMode) {
    let (state, error, record) = match store.load() {
        LoadedSnapshot::Found(record) => ("found", None, Some(record)),
        LoadedSnapshot::Missing => ("missing", None, None),
        LoadedSnapshot::Unreadable(reason) => ("unreadable", Some(reason), None),
    };

    SnapshotView {
        path: store.path().display().to_string(),
        state: state.to_string(),
        error,
        record,
    }
    .render(mode);
}

fn clear(store: &JsonSnapshotStore, mode: OutputMode) -> anyhow::Result<()> {
    let removed = store.clear()?;
    let message = if removed {
        format!("Removed snapshot {}", store.path().display())
    } else {
        format!("No snapshot at {}", store.path().display())
    };

    OperationResult {
        success: true,
        message,
    }
    .render(mode);
    Ok(())
}
