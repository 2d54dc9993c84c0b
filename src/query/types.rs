//! Query Pipeline Types
//!
//! Results, errors, and terminal outcomes shared by the invoker, the gate and
//! the publisher.

use std::time::Duration;

use thiserror::Error;

/// Captured result of one finished jq process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, or None when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Error types for query execution
///
/// A jq run that exits non-zero is not a `QueryError`; it is a
/// [`ProcessOutput`] whose stderr carries the diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Failed to spawn jq process
    #[error("Failed to spawn jq: {0}")]
    SpawnFailed(String),
    /// Failed to feed the document to jq
    #[error("Failed to write jq input: {0}")]
    InputWriteFailed(String),
    /// Failed to read jq output
    #[error("Failed to read jq output: {0}")]
    OutputReadFailed(String),
    /// Killed after exceeding the configured hard timeout
    #[error("jq did not finish within {} ms", .0.as_millis())]
    TimedOut(Duration),
    /// Query execution was cancelled
    #[error("Query execution cancelled")]
    Cancelled,
    /// The run ended without a result, e.g. the invoker panicked
    #[error("Query run aborted before jq reported")]
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("execution gate already disposed")]
    Disposed,
}

/// Terminal state of one submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Result (or invocation failure) applied to the output view
    Published,
    /// Finished, but a newer request had already replaced it
    Discarded,
    /// Cancelled while jq was running, or the run's task failed
    Cancelled,
    /// Cancelled before jq was started
    SupersededBeforeStart,
}
