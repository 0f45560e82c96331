//! Error types for the run pipeline.
//!
//! Per-target failures are never errors: they become failure records. These
//! types cover only what stops a run.

use crate::report::RunReport;
use std::path::PathBuf;

/// Problems reading the target list.
#[derive(thiserror::Error, Debug)]
pub enum TargetsError {
    #[error("target list '{0}' not found")]
    NotFound(PathBuf),

    #[error("target list '{path}' could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("target list '{0}' contains no URLs")]
    Empty(PathBuf),
}

/// Rendering engine problems.
///
/// `Launch` aborts the run. `Session` is recorded against the target that
/// asked for the session.
#[derive(thiserror::Error, Debug, Clone)]
pub enum EngineError {
    #[error("rendering engine failed to start: {0}")]
    Launch(String),

    #[error("rendering engine could not open a session: {0}")]
    Session(String),
}

/// Errors that end a run early.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Targets(#[from] TargetsError),

    #[error("artifact directory '{path}' could not be created: {source}")]
    ArtifactDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client could not be built: {0}")]
    HttpClient(String),

    /// The engine failed; `partial` holds the targets finished before it did.
    #[error("{source}")]
    EngineAborted {
        source: EngineError,
        partial: Box<RunReport>,
    },
}
