//! Command-line flags shared by `run` and `doctor`.

use crate::config::{ArtifactLayout, ProbeConfig, DEFAULT_USER_AGENT};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// File listing one URL per line ('#' starts a comment)
    #[arg(short, long, default_value = "urls.txt")]
    pub targets: PathBuf,

    /// Directory receiving page snapshots
    #[arg(long, default_value = "screenshots")]
    pub artifact_dir: PathBuf,

    /// Keep one snapshot per target, or a new directory per run
    #[arg(long, value_enum, default_value_t = ArtifactLayout::Overwrite)]
    pub artifact_layout: ArtifactLayout,

    /// HTML report path
    #[arg(short, long, default_value = "index.html")]
    pub report: PathBuf,

    /// Also write the report as JSON to this path
    #[arg(long)]
    pub json_report: Option<PathBuf>,

    /// Timeout for the pre-check and API requests, in seconds
    #[arg(long, default_value = "15")]
    pub timeout: u64,

    /// Wait after page load before the snapshot, in milliseconds
    #[arg(long, default_value = "5000")]
    pub settle_ms: u64,

    /// Browser navigation timeout, in seconds
    #[arg(long, default_value = "30")]
    pub navigation_timeout: u64,

    /// Validate TLS certificates (skipped by default)
    #[arg(long)]
    pub strict_tls: bool,

    /// Browser sessions available to web probes
    #[arg(long, default_value = "1")]
    pub pool_size: usize,

    /// Targets checked at the same time
    #[arg(long, default_value = "1")]
    pub concurrency: usize,

    /// Path to the Chrome/Chromium binary
    #[arg(long)]
    pub chromium: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// User-Agent header for HTTP requests and the browser
    #[arg(long)]
    pub user_agent: Option<String>,
}

impl RunArgs {
    pub fn into_config(self) -> ProbeConfig {
        ProbeConfig {
            targets_file: self.targets,
            artifact_dir: self.artifact_dir,
            artifact_layout: self.artifact_layout,
            report_file: self.report,
            json_report: self.json_report,
            request_timeout: Duration::from_secs(self.timeout),
            settle_wait: Duration::from_millis(self.settle_ms),
            navigation_timeout: Duration::from_secs(self.navigation_timeout),
            accept_invalid_certs: !self.strict_tls,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            pool_size: self.pool_size,
            concurrency: self.concurrency,
            chromium_path: self.chromium,
            headless: !self.headed,
            ..ProbeConfig::default()
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: RunArgs,
    }

    #[test]
    fn test_defaults_match_config_defaults() {
        let cfg = Harness::parse_from(["urlcheck"]).args.into_config();
        let expected = ProbeConfig::default();
        assert_eq!(cfg.targets_file, expected.targets_file);
        assert_eq!(cfg.request_timeout, expected.request_timeout);
        assert_eq!(cfg.settle_wait, expected.settle_wait);
        assert_eq!(cfg.navigation_timeout, expected.navigation_timeout);
        assert!(cfg.accept_invalid_certs);
        assert!(cfg.headless);
    }

    #[test]
    fn test_flags_map_onto_config() {
        let cfg = Harness::parse_from([
            "urlcheck",
            "--targets",
            "prod.txt",
            "--artifact-layout",
            "per-run",
            "--strict-tls",
            "--concurrency",
            "0",
            "--settle-ms",
            "250",
        ])
        .args
        .into_config();
        assert_eq!(cfg.targets_file, PathBuf::from("prod.txt"));
        assert_eq!(cfg.artifact_layout, ArtifactLayout::PerRun);
        assert!(!cfg.accept_invalid_certs);
        assert_eq!(cfg.concurrency, 1);
        assert_eq!(cfg.settle_wait, Duration::from_millis(250));
    }
}
