//! Async HTTP client wrapping reqwest.
//!
//! Shared by the classification pre-check (HEAD) and the API probe (GET).
//! Follows redirects, enforces the configured timeout and never retries.

use crate::config::ProbeConfig;
use anyhow::{Context, Result};

/// Most redirects followed before a request gives up.
const MAX_REDIRECTS: usize = 10;

/// Response from an HTTP HEAD request.
#[derive(Debug, Clone)]
pub struct HeadResponse {
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header, if the server sent one.
    pub content_type: Option<String>,
}

/// Response from an HTTP GET request. The body is not kept.
#[derive(Debug, Clone)]
pub struct GetResponse {
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
}

/// HTTP client for the pre-check and the API probe.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Build a client from the run configuration.
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Request headers only.
    pub async fn head(&self, url: &str) -> Result<HeadResponse, reqwest::Error> {
        let resp = self.client.head(url).send().await?;
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        Ok(HeadResponse {
            final_url: resp.url().to_string(),
            status: resp.status().as_u16(),
            content_type,
        })
    }

    /// Plain GET; the status is what matters, the body is discarded unread.
    pub async fn get(&self, url: &str) -> Result<GetResponse, reqwest::Error> {
        let resp = self.client.get(url).send().await?;
        Ok(GetResponse {
            final_url: resp.url().to_string(),
            status: resp.status().as_u16(),
        })
    }
}
