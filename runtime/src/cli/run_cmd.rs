//! `urlcheck run` — probe every listed target and write the report.

use crate::config::ProbeConfig;
use crate::error::RunError;
use crate::pool::Launcher;
use crate::progress::{self, ProgressEventKind, ProgressReceiver};
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::Renderer;
use crate::report::{self, RunReport};
use crate::runner;
use anyhow::{anyhow, Result};
use futures::FutureExt;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Run the check against a real Chromium.
pub async fn run(config: ProbeConfig, quiet: bool) -> Result<()> {
    let launcher = chromium_launcher(&config);
    run_with(config, launcher, quiet).await
}

/// Run the check with the given engine launcher and write the reports.
///
/// Failures come back as the error; the caller prints them.
pub async fn run_with(config: ProbeConfig, launcher: Launcher, quiet: bool) -> Result<()> {
    if !quiet {
        println!("urlcheck v{}", env!("CARGO_PKG_VERSION"));
    }

    let (tx, rx) = progress::channel();
    let narrator = (!quiet).then(|| tokio::spawn(narrate(rx)));

    let result = runner::run(&config, launcher, Some(tx)).await;
    if let Some(handle) = narrator {
        let _ = handle.await;
    }

    match result {
        Ok(report) => {
            write_reports(&config, &report)?;
            if !quiet {
                print_summary(&config, &report);
            }
            Ok(())
        }
        Err(RunError::EngineAborted { source, partial }) => {
            let outcome = if partial.is_empty() {
                "No target finished before the failure; no report written.".to_string()
            } else {
                write_reports(&config, &partial)?;
                format!(
                    "Partial report with {} result(s) written to {}",
                    partial.summary.total,
                    config.report_file.display()
                )
            };
            Err(anyhow!(
                "[CRITICAL] {source}\n  {outcome}\n  \
                 Check that Chrome/Chromium is installed and can start on this machine."
            ))
        }
        Err(RunError::Targets(e)) => Err(anyhow!(
            "{e}\n  Add the URLs to check to this file, one per line."
        )),
        Err(e) => Err(e.into()),
    }
}

/// Launches Chromium on the first web target.
fn chromium_launcher(config: &ProbeConfig) -> Launcher {
    let config = config.clone();
    Box::new(move || {
        let config = config.clone();
        async move {
            let renderer = ChromiumRenderer::launch(&config).await?;
            Ok::<Arc<dyn Renderer>, anyhow::Error>(Arc::new(renderer))
        }
        .boxed()
    })
}

fn write_reports(config: &ProbeConfig, run_report: &RunReport) -> Result<()> {
    report::html::write(run_report, &config.report_file)?;
    if let Some(path) = &config.json_report {
        report::json::write(run_report, path)?;
    }
    Ok(())
}

fn print_summary(config: &ProbeConfig, report: &RunReport) {
    let s = &report.summary;
    println!();
    println!(
        "{} URL(s): {} succeeded, {} failed in {:.2}s",
        s.total, s.success_count, s.failure_count, s.elapsed_secs
    );
    println!("Report written to {}", config.report_file.display());
    if let Some(path) = &config.json_report {
        println!("JSON report written to {}", path.display());
    }
}

/// Print one line per pipeline step until the run drops its sender.
async fn narrate(mut rx: ProgressReceiver) {
    let mut total = 0;
    loop {
        let event = match rx.recv().await {
            Ok(event) => event.event,
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        };
        match event {
            ProgressEventKind::RunStarted { total: n } => {
                total = n;
                println!("Checking {n} URL(s)");
            }
            ProgressEventKind::TargetStarted { index, url } => {
                println!();
                println!("[{}/{total}] {url}", index + 1);
            }
            ProgressEventKind::TargetClassified { kind, fallback, .. } => {
                if fallback {
                    println!("  -> pre-check failed, trying as {kind}");
                } else {
                    println!("  -> classified as {kind}");
                }
            }
            ProgressEventKind::TargetFinished {
                url,
                status,
                detail,
                ..
            } => {
                let tag = if status.is_success() { "OK" } else { "FAIL" };
                println!("  [{tag}] {url}: {detail}");
            }
            ProgressEventKind::EngineFailed { message } => {
                println!("  [!!] {message}");
            }
            ProgressEventKind::RunComplete { .. } => {}
        }
    }
}
