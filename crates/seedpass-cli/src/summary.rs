use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use seedpass_core::AugmentReport;
use seedpass_core::atomic::write_json_atomic;

use crate::CliError;

/// JSON document written by `--report`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: AugmentReport,
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), CliError> {
    write_json_atomic(path, summary)?;
    Ok(())
}
