//! One pass over the target list.
//!
//! Targets run through an ordered stream: up to `concurrency` of them are in
//! flight, web probes additionally wait for a pooled browser session, and
//! records come out in input order no matter which probe finishes first.

use crate::aggregate::RunSummary;
use crate::config::ProbeConfig;
use crate::error::{EngineError, RunError};
use crate::pool::{Launcher, SessionPool};
use crate::probe::{Dispatcher, HttpClient, PreCheck, ResultRecord, WebProbe};
use crate::progress::{Progress, ProgressEventKind, ProgressSender};
use crate::report::RunReport;
use crate::targets::load_targets;
use chrono::Local;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};

/// Probes targets with one dispatcher and one session pool.
pub struct Runner {
    dispatcher: Dispatcher,
    pool: Arc<SessionPool>,
    concurrency: usize,
    progress: Progress,
}

impl Runner {
    /// Wire the pipeline for `config`, writing snapshots to `artifact_dir`.
    pub fn new(
        config: &ProbeConfig,
        launcher: Launcher,
        artifact_dir: std::path::PathBuf,
        progress: Option<ProgressSender>,
    ) -> anyhow::Result<Self> {
        let client = HttpClient::new(config)?;
        let pool = Arc::new(SessionPool::new(launcher, config.pool_size));
        let web = WebProbe::new(Arc::clone(&pool), artifact_dir, config.settle_wait);
        Ok(Self {
            dispatcher: Dispatcher::new(client, web),
            pool,
            concurrency: config.concurrency.max(1),
            progress: Progress::new(progress),
        })
    }

    /// Probe every target once.
    ///
    /// On engine failure the records finished so far, in input order, are
    /// returned alongside the error.
    pub async fn probe_all(
        &self,
        targets: &[String],
    ) -> Result<Vec<ResultRecord>, (Vec<ResultRecord>, EngineError)> {
        self.progress.emit(ProgressEventKind::RunStarted {
            total: targets.len(),
        });

        let mut results = stream::iter(targets.iter().enumerate())
            .map(|(index, url)| {
                self.probe_one(index, url)
                    .instrument(info_span!("target", index, url = url.as_str()))
            })
            .buffered(self.concurrency);

        let mut records = Vec::with_capacity(targets.len());
        while let Some(result) = results.next().await {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    error!("rendering engine failed, aborting run: {e}");
                    self.progress.emit(ProgressEventKind::EngineFailed {
                        message: e.to_string(),
                    });
                    return Err((records, e));
                }
            }
        }
        Ok(records)
    }

    async fn probe_one(&self, index: usize, url: &str) -> Result<ResultRecord, EngineError> {
        self.progress.emit(ProgressEventKind::TargetStarted {
            index,
            url: url.to_string(),
        });

        let check = self.dispatcher.pre_check(url).await;
        self.progress.emit(ProgressEventKind::TargetClassified {
            index,
            url: url.to_string(),
            kind: check.route(),
            fallback: matches!(check, PreCheck::Unreachable { .. }),
        });

        let record = self.dispatcher.dispatch_with(url, &check).await?;
        self.progress.emit(ProgressEventKind::TargetFinished {
            index,
            url: url.to_string(),
            kind: record.kind,
            status: record.status,
            detail: record.detail.clone(),
        });
        Ok(record)
    }

    /// Release browser sessions and stop the engine.
    pub async fn shutdown(&self) {
        self.pool.shutdown().await;
    }

    fn complete(&self, summary: &RunSummary) {
        self.progress.emit(ProgressEventKind::RunComplete {
            total: summary.total,
            success_count: summary.success_count,
            failure_count: summary.failure_count,
            elapsed_ms: (summary.elapsed_secs * 1000.0) as u64,
        });
    }
}

/// Load the target list, probe every target and aggregate the results.
///
/// A missing or empty target list fails before anything is probed. An engine
/// failure fails with [`RunError::EngineAborted`] carrying the partial report.
pub async fn run(
    config: &ProbeConfig,
    launcher: Launcher,
    progress: Option<ProgressSender>,
) -> Result<RunReport, RunError> {
    let targets = load_targets(&config.targets_file)?;
    run_targets(config, &targets, launcher, progress).await
}

/// Probe an already loaded target list.
pub async fn run_targets(
    config: &ProbeConfig,
    targets: &[String],
    launcher: Launcher,
    progress: Option<ProgressSender>,
) -> Result<RunReport, RunError> {
    let started_at = Local::now();
    let clock = Instant::now();

    let artifact_dir = config.artifact_dir_for_run(started_at);
    std::fs::create_dir_all(&artifact_dir).map_err(|source| RunError::ArtifactDir {
        path: artifact_dir.clone(),
        source,
    })?;

    let runner = Runner::new(config, launcher, artifact_dir, progress)
        .map_err(|e| RunError::HttpClient(format!("{e:#}")))?;

    info!(targets = targets.len(), "starting run");
    let outcome = runner.probe_all(targets).await;
    runner.shutdown().await;

    match outcome {
        Ok(records) => {
            let report = RunReport::build(&records, started_at, clock.elapsed());
            runner.complete(&report.summary);
            info!(
                total = report.summary.total,
                success = report.summary.success_count,
                failure = report.summary.failure_count,
                "run complete"
            );
            Ok(report)
        }
        Err((records, source)) => {
            let report = RunReport::build(&records, started_at, clock.elapsed());
            runner.complete(&report.summary);
            Err(RunError::EngineAborted {
                source,
                partial: Box::new(report),
            })
        }
    }
}
