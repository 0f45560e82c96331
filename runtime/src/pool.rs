//! Rendering-session pool.
//!
//! Web probes check a session out, use it exclusively and hand it back when
//! the [`PooledSession`] guard drops, whatever way the probe ended. The engine
//! itself is launched on the first checkout, so a run made only of API
//! targets never starts a browser.

use crate::error::EngineError;
use crate::renderer::{RenderContext, Renderer};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};
use tokio::sync::{OnceCell, OwnedSemaphorePermit, Semaphore};
use tracing::{info, warn};

/// Starts the rendering engine on demand.
pub type Launcher =
    Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<Arc<dyn Renderer>>> + Send + Sync>;

/// A bounded pool of rendering sessions over one lazily launched engine.
pub struct SessionPool {
    launcher: Launcher,
    engine: OnceCell<Result<Arc<dyn Renderer>, EngineError>>,
    permits: Arc<Semaphore>,
    idle: Arc<Mutex<Vec<Box<dyn RenderContext>>>>,
}

impl SessionPool {
    /// Create a pool of at most `size` sessions.
    pub fn new(launcher: Launcher, size: usize) -> Self {
        let size = size.max(1);
        Self {
            launcher,
            engine: OnceCell::new(),
            permits: Arc::new(Semaphore::new(size)),
            idle: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pool over an engine that is already running.
    pub fn with_renderer(renderer: Arc<dyn Renderer>, size: usize) -> Self {
        Self::new(
            Box::new(move || {
                let renderer = Arc::clone(&renderer);
                async move { Ok::<_, anyhow::Error>(renderer) }.boxed()
            }),
            size,
        )
    }

    /// The engine, launching it if this is the first call.
    ///
    /// A failed launch is remembered; later calls return the same error
    /// without trying again.
    pub async fn engine(&self) -> Result<Arc<dyn Renderer>, EngineError> {
        self.engine
            .get_or_init(|| async {
                info!("launching rendering engine");
                (self.launcher)()
                    .await
                    .map_err(|e| EngineError::Launch(format!("{e:#}")))
            })
            .await
            .clone()
    }

    /// Check a session out, waiting while all sessions are in use.
    pub async fn acquire(&self) -> Result<PooledSession, EngineError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| EngineError::Session("session pool closed".to_string()))?;

        let reused = match self.idle.lock() {
            Ok(mut idle) => idle.pop(),
            Err(_) => None,
        };
        let context = match reused {
            Some(ctx) => ctx,
            None => {
                let engine = self.engine().await?;
                engine
                    .new_context()
                    .await
                    .map_err(|e| EngineError::Session(format!("{e:#}")))?
            }
        };

        Ok(PooledSession {
            context: Some(context),
            idle: Arc::clone(&self.idle),
            _permit: permit,
        })
    }

    /// Close idle sessions and shut the engine down if it was ever launched.
    pub async fn shutdown(&self) {
        let idle = match self.idle.lock() {
            Ok(mut idle) => std::mem::take(&mut *idle),
            Err(_) => Vec::new(),
        };
        for ctx in idle {
            if let Err(e) = ctx.close().await {
                warn!("failed to close rendering session: {e:#}");
            }
        }

        if let Some(Ok(engine)) = self.engine.get() {
            if let Err(e) = engine.shutdown().await {
                warn!("failed to shut rendering engine down: {e:#}");
            }
        }
    }
}

/// A checked-out session. Returns to the pool on drop.
pub struct PooledSession {
    context: Option<Box<dyn RenderContext>>,
    idle: Arc<Mutex<Vec<Box<dyn RenderContext>>>>,
    _permit: OwnedSemaphorePermit,
}

impl Deref for PooledSession {
    type Target = dyn RenderContext;

    fn deref(&self) -> &Self::Target {
        self.context.as_deref().expect("context present until drop")
    }
}

impl DerefMut for PooledSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context.as_deref_mut().expect("context present until drop")
    }
}

impl Drop for PooledSession {
    fn drop(&mut self) {
        if let Some(ctx) = self.context.take() {
            if let Ok(mut idle) = self.idle.lock() {
                idle.push(ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{NavigationResult, NoopRenderer};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRenderer {
        created: AtomicUsize,
    }

    struct IdleContext;

    #[async_trait]
    impl RenderContext for IdleContext {
        async fn navigate(&mut self, url: &str) -> anyhow::Result<NavigationResult> {
            Ok(NavigationResult {
                final_url: url.to_string(),
                load_time_ms: 0,
            })
        }
        async fn capture(&mut self, _path: &Path) -> anyhow::Result<()> {
            Ok(())
        }
        async fn close(self: Box<Self>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl Renderer for CountingRenderer {
        async fn new_context(&self) -> anyhow::Result<Box<dyn RenderContext>> {
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(IdleContext))
        }
        async fn shutdown(&self) -> anyhow::Result<()> {
            Ok(())
        }
        fn active_contexts(&self) -> usize {
            0
        }
    }

    #[tokio::test]
    async fn test_sessions_are_reused_after_release() {
        let renderer = Arc::new(CountingRenderer {
            created: AtomicUsize::new(0),
        });
        let pool = SessionPool::with_renderer(renderer.clone(), 1);

        for _ in 0..3 {
            let mut session = pool.acquire().await.unwrap();
            session.navigate("https://example.com").await.unwrap();
        }
        assert_eq!(renderer.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pool_bounds_checkouts() {
        let renderer = Arc::new(CountingRenderer {
            created: AtomicUsize::new(0),
        });
        let pool = SessionPool::with_renderer(renderer, 1);

        let held = pool.acquire().await.unwrap();
        let second = tokio::time::timeout(std::time::Duration::from_millis(50), pool.acquire()).await;
        assert!(second.is_err(), "second checkout must wait");

        drop(held);
        assert!(pool.acquire().await.is_ok());
    }

    #[tokio::test]
    async fn test_engine_is_launched_lazily_and_once() {
        let launches = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&launches);
        let pool = SessionPool::new(
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async {
                    Ok::<Arc<dyn Renderer>, anyhow::Error>(Arc::new(CountingRenderer {
                        created: AtomicUsize::new(0),
                    }))
                }
                .boxed()
            }),
            2,
        );
        assert_eq!(launches.load(Ordering::SeqCst), 0);

        let a = pool.acquire().await.unwrap();
        let b = pool.acquire().await.unwrap();
        drop((a, b));
        assert_eq!(launches.load(Ordering::SeqCst), 1);
        pool.shutdown().await;
    }

    #[tokio::test]
    async fn test_launch_failure_is_sticky() {
        let launches = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&launches);
        let pool = SessionPool::new(
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err::<Arc<dyn Renderer>, _>(anyhow::anyhow!("no chromium")) }.boxed()
            }),
            1,
        );

        assert!(matches!(pool.acquire().await, Err(EngineError::Launch(_))));
        assert!(matches!(pool.acquire().await, Err(EngineError::Launch(_))));
        assert_eq!(launches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_session_creation_failure() {
        let pool = SessionPool::with_renderer(Arc::new(NoopRenderer), 1);
        assert!(matches!(pool.acquire().await, Err(EngineError::Session(_))));
        // The permit is released on the error path.
        assert!(matches!(pool.acquire().await, Err(EngineError::Session(_))));
    }
}
