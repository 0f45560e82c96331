// Copyright 2026 Urlcheck Contributors
// SPDX-License-Identifier: Apache-2.0

//! Progress event types and broadcast channel for run narration.
//!
//! The runner emits `ProgressEvent`s as targets move through the pipeline.
//! Events flow through a `tokio::sync::broadcast` channel to every
//! subscriber (the CLI narrator, tests). When no subscriber exists, events
//! are silently dropped.

use crate::probe::{ProbeKind, ProbeStatus};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A progress event emitted during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Monotonically increasing sequence number.
    pub seq: u64,
    /// The kind of progress event.
    pub event: ProgressEventKind,
}

/// The specific kind of progress event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgressEventKind {
    /// The run is about to probe `total` targets.
    RunStarted { total: usize },
    /// Work on a target began. `index` is its position in the input list.
    TargetStarted { index: usize, url: String },
    /// The pre-check routed a target. `fallback` is set when the pre-check
    /// got no response and the web probe was chosen by default.
    TargetClassified {
        index: usize,
        url: String,
        kind: ProbeKind,
        fallback: bool,
    },
    /// A target produced its record.
    TargetFinished {
        index: usize,
        url: String,
        kind: ProbeKind,
        status: ProbeStatus,
        detail: String,
    },
    /// The rendering engine failed; the run stops.
    EngineFailed { message: String },
    /// All targets done (or the run was aborted).
    RunComplete {
        total: usize,
        success_count: usize,
        failure_count: usize,
        elapsed_ms: u64,
    },
}

/// Sender handle for emitting progress events.
pub type ProgressSender = tokio::sync::broadcast::Sender<ProgressEvent>;

/// Receiver handle for consuming progress events.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<ProgressEvent>;

/// Create a new progress broadcast channel with a bounded buffer.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(256)
}

/// Numbers and sends events on an optional channel.
///
/// Shared by concurrently running targets, so the sequence counter is atomic.
#[derive(Debug, Default)]
pub struct Progress {
    tx: Option<ProgressSender>,
    seq: AtomicU64,
}

impl Progress {
    pub fn new(tx: Option<ProgressSender>) -> Self {
        Self {
            tx,
            seq: AtomicU64::new(0),
        }
    }

    /// Emit an event, ignoring the error raised when nobody listens.
    pub fn emit(&self, event: ProgressEventKind) {
        if let Some(ref sender) = self.tx {
            let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
            let _ = sender.send(ProgressEvent { seq, event });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_event_serialization() {
        let event = ProgressEvent {
            seq: 1,
            event: ProgressEventKind::TargetClassified {
                index: 0,
                url: "https://a.example".to_string(),
                kind: ProbeKind::Api,
                fallback: false,
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"]["type"], "TargetClassified");
        assert_eq!(json["event"]["kind"], "api");
    }

    #[tokio::test]
    async fn test_emit_numbers_events() {
        let (tx, mut rx) = channel();
        let progress = Progress::new(Some(tx));
        progress.emit(ProgressEventKind::RunStarted { total: 2 });
        progress.emit(ProgressEventKind::EngineFailed {
            message: "boom".to_string(),
        });

        assert_eq!(rx.recv().await.unwrap().seq, 1);
        assert_eq!(rx.recv().await.unwrap().seq, 2);
    }

    #[test]
    fn test_emit_without_channel_is_noop() {
        let progress = Progress::new(None);
        progress.emit(ProgressEventKind::RunStarted { total: 0 });
    }
}
