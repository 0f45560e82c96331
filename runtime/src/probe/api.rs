//! API probe: one GET, judged by status code.

use super::{error_detail, HttpClient, ProbeKind, ProbeOutcome, ProbeStatus};
use tracing::{info, warn};

/// Exercises machine endpoints.
#[derive(Clone)]
pub struct ApiProbe {
    client: HttpClient,
}

impl ApiProbe {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// GET `url` once. 2xx is success; any other status is a failure that
    /// still carries the code. No response at all leaves the code empty.
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        info!(url, "checking API");
        match self.client.get(url).await {
            Ok(resp) => {
                let status = classify_status(resp.status);
                if status.is_success() {
                    info!(url, code = resp.status, "API responded");
                } else {
                    warn!(url, code = resp.status, "API responded with error status");
                }
                ProbeOutcome {
                    kind: ProbeKind::Api,
                    status,
                    detail: format!("status code {}", resp.status),
                    artifact: None,
                    status_code: Some(resp.status),
                }
            }
            Err(e) => {
                let detail = error_detail(&anyhow::Error::new(e));
                warn!(url, error = %detail, "API unreachable");
                ProbeOutcome {
                    kind: ProbeKind::Api,
                    status: ProbeStatus::Failure,
                    detail,
                    artifact: None,
                    status_code: None,
                }
            }
        }
    }
}

/// `200..=299` is success, everything else failure.
pub fn classify_status(code: u16) -> ProbeStatus {
    if (200..300).contains(&code) {
        ProbeStatus::Success
    } else {
        ProbeStatus::Failure
    }
}
