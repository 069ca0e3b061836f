//! Run command - one monitoring pass

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use log::{info, warn};

use store_review_monitor::adapters::outputs::{export_outputs, step_outputs};
use store_review_monitor::adapters::{ConsoleStream, Destination, JsonSnapshotStore, ObservationFile};
use store_review_monitor::config::MonitorConfig;
use store_review_monitor::core::services::{Monitor, RetentionPolicy};
use store_review_monitor::output::{OutputMode, RunSummary};

/// Flags for `run`; each overrides the matching config value
#[derive(Debug)]
pub struct RunArgs {
    pub observations: PathBuf,
    pub cache: Option<PathBuf>,
    pub outbox: Option<PathBuf>,
    pub outputs: Option<PathBuf>,
    pub retention: Option<String>,
}

/// Run one monitoring pass
pub fn run(config_path: Option<&Path>, args: &RunArgs, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = MonitorConfig::load_or_default(config_path)?;
    apply_overrides(&mut config, args)?;

    let Some(outbox) = config.notifications.outbox.as_deref() else {
        bail!("no notification destination configured (use --outbox or [notifications] outbox)");
    };
    let destination = Destination::parse(outbox);

    let cache_path = config.cache_path();
    let store = JsonSnapshotStore::new(&cache_path);
    let source = ObservationFile::new(&args.observations)
        .with_app_id(config.app_store.app_id.clone())
        .with_package_name(config.google_play.package_name.clone());
    // Keep stdout a single JSON document in --json mode
    let console = match mode {
        OutputMode::Human => ConsoleStream::Stdout,
        OutputMode::Json => ConsoleStream::Stderr,
    };
    let notifier = destination.notifier(console);

    let report = Monitor::new(&store, &source, notifier.as_ref())
        .with_retention(config.retention)
        .run();

    if let Some(path) = &config.outputs.path {
        match export_outputs(path, &step_outputs(&report)) {
            Ok(()) => info!("Exported step outputs to {}", path.display()),
            Err(err) => warn!("Failed to export step outputs: {err:#}"),
        }
    }

    RunSummary::new(&report, &cache_path.display().to_string()).render(mode);
    Ok(())
}

fn apply_overrides(config: &mut MonitorConfig, args: &RunArgs) -> anyhow::Result<()> {
    if let Some(cache) = &args.cache {
        config.cache_path = Some(cache.clone());
    }
    if let Some(outbox) = &args.outbox {
        config.notifications.outbox = Some(outbox.clone());
    }
    if let Some(outputs) = &args.outputs {
        config.outputs.path = Some(outputs.clone());
    }
    if let Some(retention) = &args.retention {
        config.retention = retention
            .parse::<RetentionPolicy>()
            .map_err(|e| anyhow!(e))
            .context("invalid --retention")?;
    }
    Ok(())
}
