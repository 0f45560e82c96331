//! Run configuration.
//!
//! A single immutable [`ProbeConfig`] is built once by the CLI and handed to
//! the dispatcher, both probes and the renderer at construction time.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Desktop Chrome user agent sent by the pre-check, the API probe and the
/// rendering engine.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/131.0.0.0 Safari/537.36";

/// How snapshot artifacts are laid out across repeated runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactLayout {
    /// `{artifact_dir}/{name}.png`; a later run replaces earlier snapshots.
    #[default]
    Overwrite,
    /// `{artifact_dir}/{run timestamp}/{name}.png`; every run keeps its own.
    PerRun,
}

/// Immutable settings for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// File holding the target list.
    pub targets_file: PathBuf,
    /// Directory receiving web snapshots.
    pub artifact_dir: PathBuf,
    pub artifact_layout: ArtifactLayout,
    /// Where the HTML report is written.
    pub report_file: PathBuf,
    /// Optional JSON rendition of the same report.
    pub json_report: Option<PathBuf>,
    /// Bound on the HEAD pre-check and the API GET.
    pub request_timeout: Duration,
    /// Unconditional delay between navigation and capture.
    pub settle_wait: Duration,
    /// Engine-internal timeout for a single navigation.
    pub navigation_timeout: Duration,
    /// Skip TLS certificate validation (HTTP client and browser alike).
    pub accept_invalid_certs: bool,
    pub user_agent: String,
    /// Number of rendering sessions in the pool.
    pub pool_size: usize,
    /// Number of targets in flight at once.
    pub concurrency: usize,
    /// Explicit browser binary; otherwise searched for.
    pub chromium_path: Option<PathBuf>,
    pub headless: bool,
    pub window_size: (u32, u32),
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            targets_file: PathBuf::from("urls.txt"),
            artifact_dir: PathBuf::from("screenshots"),
            artifact_layout: ArtifactLayout::Overwrite,
            report_file: PathBuf::from("index.html"),
            json_report: None,
            request_timeout: Duration::from_secs(15),
            settle_wait: Duration::from_secs(5),
            navigation_timeout: Duration::from_secs(30),
            accept_invalid_certs: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pool_size: 1,
            concurrency: 1,
            chromium_path: None,
            headless: true,
            window_size: (1920, 1080),
        }
    }
}

impl ProbeConfig {
    /// Directory the snapshots of a run started at `started_at` land in.
    pub fn artifact_dir_for_run(&self, started_at: DateTime<Local>) -> PathBuf {
        match self.artifact_layout {
            ArtifactLayout::Overwrite => self.artifact_dir.clone(),
            ArtifactLayout::PerRun => self
                .artifact_dir
                .join(started_at.format("%Y%m%d-%H%M%S").to_string()),
        }
    }

    /// Clamp worker counts to at least one.
    pub fn normalized(mut self) -> Self {
        self.pool_size = self.pool_size.max(1);
        self.concurrency = self.concurrency.max(1);
        self
    }
}

/// Path of a snapshot named `stem` inside `dir`.
pub fn snapshot_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults_match_original_tool() {
        let cfg = ProbeConfig::default();
        assert_eq!(cfg.request_timeout, Duration::from_secs(15));
        assert_eq!(cfg.settle_wait, Duration::from_secs(5));
        assert!(cfg.accept_invalid_certs);
        assert_eq!(cfg.pool_size, 1);
        assert_eq!(cfg.concurrency, 1);
    }

    #[test]
    fn test_artifact_layout() {
        let started = Local.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        let mut cfg = ProbeConfig::default();
        assert_eq!(cfg.artifact_dir_for_run(started), PathBuf::from("screenshots"));

        cfg.artifact_layout = ArtifactLayout::PerRun;
        assert_eq!(
            cfg.artifact_dir_for_run(started),
            PathBuf::from("screenshots").join("20260304-050607")
        );
    }

    #[test]
    fn test_normalized_clamps_zero_workers() {
        let cfg = ProbeConfig {
            pool_size: 0,
            concurrency: 0,
            ..ProbeConfig::default()
        }
        .normalized();
        assert_eq!(cfg.pool_size, 1);
        assert_eq!(cfg.concurrency, 1);
    }

    #[test]
    fn test_snapshot_path() {
        assert_eq!(
            snapshot_path(Path::new("shots"), "example.com"),
            PathBuf::from("shots").join("example.com.png")
        );
    }
}
