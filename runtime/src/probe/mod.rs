//! Classification and probing of targets.
//!
//! A target is pre-checked with HEAD, routed to the web or API probe, and the
//! probe's outcome is normalized into one [`ResultRecord`].

pub mod api;
pub mod classify;
pub mod http_client;
pub mod web;

pub use api::ApiProbe;
pub use classify::{Dispatcher, PreCheck};
pub use http_client::HttpClient;
pub use web::WebProbe;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which probe exercised a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    Web,
    Api,
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Web => write!(f, "web"),
            Self::Api => write!(f, "api"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Success,
    Failure,
}

impl ProbeStatus {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// What one probe found.
///
/// `artifact` is only ever set by the web probe on success, `status_code`
/// only by the API probe when a response arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub kind: ProbeKind,
    pub status: ProbeStatus,
    /// Never empty.
    pub detail: String,
    pub artifact: Option<PathBuf>,
    pub status_code: Option<u16>,
}

/// The normalized outcome for one target, as consumed by reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The target exactly as listed.
    pub url: String,
    pub system_name: String,
    pub kind: ProbeKind,
    pub status: ProbeStatus,
    pub detail: String,
    pub artifact: Option<PathBuf>,
    pub status_code: Option<u16>,
}

impl ResultRecord {
    pub fn new(url: &str, outcome: ProbeOutcome) -> Self {
        Self {
            url: url.to_string(),
            system_name: crate::naming::extract_system_name(url),
            kind: outcome.kind,
            status: outcome.status,
            detail: outcome.detail,
            artifact: outcome.artifact,
            status_code: outcome.status_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// First line of an error's full cause chain, never empty.
pub(crate) fn error_detail(err: &anyhow::Error) -> String {
    first_line(&format!("{err:#}"))
}

/// First non-blank line of `message`, trimmed.
pub(crate) fn first_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown error".to_string())
}
