use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::handle::{ExecutionHandle, HandleSlot};
use super::types::{Outcome, ProcessOutput, QueryError};

/// What the status line under the query shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusLine {
    #[default]
    Empty,
    /// stderr of a successful run
    Warning(String),
    /// stderr of a run that exited non-zero
    Error(String),
    /// jq could not be run at all
    InvocationFailed(String),
}

impl StatusLine {
    pub fn text(&self) -> &str {
        match self {
            StatusLine::Empty => "",
            StatusLine::Warning(text)
            | StatusLine::Error(text)
            | StatusLine::InvocationFailed(text) => text,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StatusLine::Empty)
    }

    fn for_output(output: &ProcessOutput) -> Self {
        let stderr = output.stderr.trim_end();
        if output.success() {
            if stderr.is_empty() {
                StatusLine::Empty
            } else {
                StatusLine::Warning(stderr.to_string())
            }
        } else if stderr.is_empty() {
            StatusLine::Error(match output.exit_code {
                Some(code) => format!("jq exited with status {}", code),
                None => "jq was terminated by a signal".to_string(),
            })
        } else {
            StatusLine::Error(stderr.to_string())
        }
    }
}

/// Observable output of the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputState {
    /// stdout of the last successful run
    pub output: String,
    pub status: StatusLine,
    /// Exit code of the last published run
    pub last_exit_code: Option<i32>,
    /// Incremented on every applied publish
    pub revision: u64,
}

/// Shared handle to the output state, cloned into the host
#[derive(Debug, Clone, Default)]
pub struct OutputView {
    state: Arc<Mutex<OutputState>>,
}

impl OutputView {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, OutputState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> OutputState {
        self.lock().clone()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    pub fn output(&self) -> String {
        self.lock().output.clone()
    }

    pub fn status(&self) -> StatusLine {
        self.lock().status.clone()
    }

    fn update(&self, apply: impl FnOnce(&mut OutputState)) {
        let mut state = self.lock();
        apply(&mut state);
        state.revision = state.revision.wrapping_add(1);
    }
}

/// Applies finished runs to the output view if they are still current
#[derive(Debug, Clone)]
pub struct ResultPublisher {
    slot: Arc<HandleSlot>,
    view: OutputView,
}

impl ResultPublisher {
    pub fn new(slot: Arc<HandleSlot>, view: OutputView) -> Self {
        Self { slot, view }
    }

    pub fn view(&self) -> &OutputView {
        &self.view
    }

    /// Publish the result of `handle`'s run
    ///
    /// Stale or cancelled results are dropped without touching the view.
    pub fn publish(
        &self,
        handle: &ExecutionHandle,
        result: Result<ProcessOutput, QueryError>,
    ) -> Outcome {
        let request_id = handle.request_id();

        if let Err(QueryError::Cancelled) = result {
            log::debug!("Request {} was cancelled", request_id);
            return Outcome::Cancelled;
        }

        let applied = self
            .slot
            .retire_if_current(handle, || self.apply(request_id, result));

        match applied {
            Some(()) => Outcome::Published,
            None => {
                log::debug!(
                    "Ignoring stale result from request {} (current: {:?})",
                    request_id,
                    self.slot.current_id()
                );
                Outcome::Discarded
            }
        }
    }

    fn apply(&self, request_id: u64, result: Result<ProcessOutput, QueryError>) {
        match result {
            Ok(output) => {
                log::debug!(
                    "Request {} finished with exit code {:?}",
                    request_id,
                    output.exit_code
                );
                let status = StatusLine::for_output(&output);
                self.view.update(|state| {
                    state.status = status;
                    state.last_exit_code = output.exit_code;
                    // Failed runs keep the previous output on screen
                    if output.success() {
                        state.output = output.stdout;
                    }
                });
            }
            Err(e) => {
                log::error!("Request {} could not run jq: {}", request_id, e);
                self.view.update(|state| {
                    state.status = StatusLine::InvocationFailed(e.to_string());
                    state.last_exit_code = None;
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod publisher_tests;
