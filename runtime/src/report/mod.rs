//! Report rendering.
//!
//! A [`RunReport`] is the fixed schema handed to renderers: the run summary
//! plus every record in failure-first order. HTML is the operator-facing
//! rendition; JSON carries the same data for machines.

pub mod html;
pub mod json;

use crate::aggregate::{aggregate, RunSummary};
use crate::probe::ResultRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Everything a report needs about one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub summary: RunSummary,
    /// Records in failure-first display order.
    pub results: Vec<ResultRecord>,
}

impl RunReport {
    /// Aggregate input-ordered `records` into a report.
    pub fn build(records: &[ResultRecord], started_at: DateTime<Local>, elapsed: Duration) -> Self {
        let (summary, results) = aggregate(records, started_at, elapsed);
        Self { summary, results }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Write `contents` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
