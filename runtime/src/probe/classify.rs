//! Target classification and dispatch.
//!
//! The pre-check has exactly three outcomes and each maps to one probe:
//!
//! | pre-check                    | probe |
//! |------------------------------|-------|
//! | response, `text/html`        | web   |
//! | response, any other type     | api   |
//! | no response (transport error)| web   |
//!
//! The status code of the pre-check never matters: a 404 with an HTML body
//! is still a web target. Only a request that produced no response at all
//! falls back to the browser.

use super::{first_line, ApiProbe, HttpClient, ProbeKind, ResultRecord, WebProbe};
use crate::error::EngineError;
use tracing::{debug, info, warn};

/// What the HEAD pre-check established about a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreCheck {
    /// A response declaring `text/html`.
    Html { status: u16, content_type: String },
    /// A response with any other, or no, content type.
    NonHtml {
        status: u16,
        content_type: Option<String>,
    },
    /// The request produced no response.
    Unreachable { error: String },
}

impl PreCheck {
    /// Interpret a HEAD response by its declared content type.
    pub fn from_response(status: u16, content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.to_ascii_lowercase().contains("text/html") => Self::Html {
                status,
                content_type: ct.to_string(),
            },
            other => Self::NonHtml {
                status,
                content_type: other.map(str::to_string),
            },
        }
    }

    /// The probe this pre-check routes to.
    pub fn route(&self) -> ProbeKind {
        match self {
            Self::Html { .. } => ProbeKind::Web,
            Self::NonHtml { .. } => ProbeKind::Api,
            Self::Unreachable { .. } => ProbeKind::Web,
        }
    }
}

/// Classifies each target and runs the matching probe.
#[derive(Clone)]
pub struct Dispatcher {
    client: HttpClient,
    api: ApiProbe,
    web: WebProbe,
}

impl Dispatcher {
    pub fn new(client: HttpClient, web: WebProbe) -> Self {
        Self {
            api: ApiProbe::new(client.clone()),
            client,
            web,
        }
    }

    /// Issue the HEAD pre-check.
    pub async fn pre_check(&self, url: &str) -> PreCheck {
        match self.client.head(url).await {
            Ok(resp) => {
                debug!(
                    url,
                    status = resp.status,
                    final_url = %resp.final_url,
                    content_type = ?resp.content_type,
                    "pre-check answered"
                );
                PreCheck::from_response(resp.status, resp.content_type.as_deref())
            }
            Err(e) => PreCheck::Unreachable {
                error: first_line(&format!("{:#}", anyhow::Error::new(e))),
            },
        }
    }

    /// Classify `url`, probe it and build its record.
    ///
    /// `Err` only when the rendering engine is unusable.
    pub async fn dispatch(&self, url: &str) -> Result<ResultRecord, EngineError> {
        let check = self.pre_check(url).await;
        self.dispatch_with(url, &check).await
    }

    /// Run the probe a completed pre-check routes to.
    pub async fn dispatch_with(
        &self,
        url: &str,
        check: &PreCheck,
    ) -> Result<ResultRecord, EngineError> {
        match check {
            PreCheck::Html { .. } => info!(url, "classified as web page"),
            PreCheck::NonHtml { content_type, .. } => info!(
                url,
                content_type = content_type.as_deref().unwrap_or(""),
                "classified as API"
            ),
            PreCheck::Unreachable { error } => warn!(
                url,
                error = %error,
                "pre-check failed, treating as web page"
            ),
        }

        let outcome = match check.route() {
            ProbeKind::Web => self.web.probe(url).await?,
            ProbeKind::Api => self.api.probe(url).await,
        };
        Ok(ResultRecord::new(url, outcome))
    }
}
