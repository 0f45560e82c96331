//! Web probe: render the page in a pooled browser session and snapshot it.

use super::{error_detail, first_line, ProbeKind, ProbeOutcome, ProbeStatus};
use crate::config::snapshot_path;
use crate::error::EngineError;
use crate::naming::sanitize_filename;
use crate::pool::SessionPool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Exercises rendered pages.
#[derive(Clone)]
pub struct WebProbe {
    pool: Arc<SessionPool>,
    artifact_dir: PathBuf,
    settle_wait: Duration,
}

impl WebProbe {
    pub fn new(pool: Arc<SessionPool>, artifact_dir: PathBuf, settle_wait: Duration) -> Self {
        Self {
            pool,
            artifact_dir,
            settle_wait,
        }
    }

    /// Where the snapshot of `url` is written.
    pub fn artifact_path(&self, url: &str) -> PathBuf {
        snapshot_path(&self.artifact_dir, &sanitize_filename(url))
    }

    /// Navigate, wait the settle time, capture.
    ///
    /// Session, navigation and capture errors are failure outcomes. `Err`
    /// means the engine could not be launched and the run cannot go on.
    pub async fn probe(&self, url: &str) -> Result<ProbeOutcome, EngineError> {
        let mut session = match self.pool.acquire().await {
            Ok(session) => session,
            Err(EngineError::Session(message)) => {
                let detail = first_line(&message);
                warn!(url, error = %detail, "no browser session for page");
                return Ok(failure(detail));
            }
            Err(e) => return Err(e),
        };

        info!(url, "loading page");
        match session.navigate(url).await {
            Ok(nav) => debug!(
                url,
                final_url = %nav.final_url,
                load_time_ms = nav.load_time_ms,
                "page loaded"
            ),
            Err(e) => {
                let detail = error_detail(&e);
                warn!(url, error = %detail, "page could not be loaded");
                return Ok(failure(detail));
            }
        }

        tokio::time::sleep(self.settle_wait).await;

        let path = self.artifact_path(url);
        if let Err(e) = session.capture(&path).await {
            let detail = error_detail(&e);
            warn!(url, error = %detail, "snapshot could not be captured");
            if path.exists() {
                if let Err(e) = std::fs::remove_file(&path) {
                    warn!(path = %path.display(), "failed to remove partial snapshot: {e}");
                }
            }
            return Ok(failure(detail));
        }

        info!(url, path = %path.display(), "snapshot saved");
        Ok(ProbeOutcome {
            kind: ProbeKind::Web,
            status: ProbeStatus::Success,
            detail: format!("snapshot saved at {}", path.display()),
            artifact: Some(path),
            status_code: None,
        })
    }
}

fn failure(detail: String) -> ProbeOutcome {
    ProbeOutcome {
        kind: ProbeKind::Web,
        status: ProbeStatus::Failure,
        detail,
        artifact: None,
        status_code: None,
    }
}
