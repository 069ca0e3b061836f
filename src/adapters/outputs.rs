//! Step outputs export
//!
//! CI steps read their outputs from a flat JSON object of string values.
//! Existing keys written by other steps are kept.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, bail};
use serde_json::{Map, Value};

use crate::core::models::Platform;
use crate::core::services::RunReport;

/// Output key for the App Store status
pub const APP_STORE_STATUS: &str = "STORE_REVIEW_APP_STORE_STATUS";
/// Output key for the Google Play status
pub const GOOGLE_PLAY_STATUS: &str = "STORE_REVIEW_GOOGLE_PLAY_STATUS";
/// Output key for whether any notification was sent
pub const NOTIFICATION_SENT: &str = "STORE_REVIEW_NOTIFICATION_SENT";

const fn status_key(platform: Platform) -> &'static str {
    match platform {
        Platform::AppStore => APP_STORE_STATUS,
        Platform::GooglePlay => GOOGLE_PLAY_STATUS,
    }
}

/// Outputs describing a finished run
#[must_use]
pub fn step_outputs(report: &RunReport) -> BTreeMap<String, String> {
    let mut outputs = BTreeMap::new();
    for outcome in &report.platforms {
        if let Some(status) = outcome.status() {
            outputs.insert(status_key(outcome.platform).to_string(), status.to_string());
        }
    }
    outputs.insert(NOTIFICATION_SENT.to_string(), report.notification_sent.to_string());
    outputs
}

/// Merge `outputs` into the JSON object at `path`
///
/// Keys written by other steps are kept whatever their value type. An
/// existing file that is not a JSON object is left untouched and reported
/// as an error.
pub fn export_outputs(path: &Path, outputs: &BTreeMap<String, String>) -> anyhow::Result<()> {
    let mut store = read_existing(path)?;

    for (key, value) in outputs {
        store.insert(key.clone(), Value::String(value.clone()));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string(&store)?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn read_existing(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        },
    };
    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => bail!("{} does not hold a JSON object, not overwriting it", path.display()),
        Err(err) => {
            bail!("failed to parse {}: {err}, not overwriting it", path.display())
        },
    }
}
