//! Renderer abstraction for browser-based page rendering.
//!
//! The rest of the crate treats the browser as an opaque engine with two
//! operations: navigate to a URL and capture a snapshot to a path. The
//! `Renderer` and `RenderContext` traits are that boundary; Chromium via
//! chromiumoxide is the production implementation.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of navigating to a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// A browser engine that can create rendering contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Create a new browser context (tab).
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
    /// Shut down the browser engine.
    async fn shutdown(&self) -> Result<()>;
    /// Number of currently active contexts.
    fn active_contexts(&self) -> usize;
}

/// A single browser context (tab) for rendering pages.
///
/// A context has no contract for concurrent use; callers hold it exclusively
/// for the duration of one probe.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate to a URL. Timeouts are the engine's own.
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult>;
    /// Capture the full page as PNG and write it to `path`.
    async fn capture(&mut self, path: &Path) -> Result<()>;
    /// Close this context.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// A renderer used when no browser is wanted or available.
///
/// Every context request fails, so web targets surface the engine failure
/// instead of hanging.
pub struct NoopRenderer;

#[async_trait]
impl Renderer for NoopRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        Err(anyhow::anyhow!("browser not available"))
    }
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
    fn active_contexts(&self) -> usize {
        0
    }
}
