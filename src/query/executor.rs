use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use super::request::QueryRequest;
use super::types::{ProcessOutput, QueryError};
use crate::settings::FormattingOptions;

/// Runs one query request to completion or cancellation
///
/// Implementations must return promptly with `QueryError::Cancelled` once the
/// token fires, and must never panic on process failures.
pub trait QueryInvoker: Send + Sync + 'static {
    fn invoke(
        &self,
        request: &QueryRequest,
        cancel_token: &CancellationToken,
    ) -> impl Future<Output = Result<ProcessOutput, QueryError>> + Send;
}

/// Execute jq queries as child processes
#[derive(Debug, Clone)]
pub struct JqExecutor {
    program: PathBuf,
    color: bool,
    timeout: Option<Duration>,
}

impl JqExecutor {
    /// Create an executor for the given jq binary
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            color: false,
            timeout: None,
        }
    }

    /// Ask jq for ANSI colored output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Kill jq if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Command line arguments for a request, query last
    pub fn build_args(&self, request: &QueryRequest) -> Vec<String> {
        let mut args = Vec::with_capacity(5);

        args.push(if self.color {
            "--color-output".to_string()
        } else {
            "--monochrome-output".to_string()
        });
        push_format_args(&mut args, request.options());

        // Empty query defaults to identity filter
        let query = request.query();
        let query = if query.trim().is_empty() { "." } else { query };
        args.push(query.to_string());

        args
    }

    /// Execute a query, racing the child process against `cancel_token`
    ///
    /// # Returns
    /// * `Ok(ProcessOutput)` - jq ran; check `success()` for its verdict
    /// * `Err(QueryError::Cancelled)` - token fired before or during the run
    /// * `Err(QueryError::*)` - jq could not be run at all
    pub async fn execute_with_cancel(
        &self,
        request: &QueryRequest,
        cancel_token: &CancellationToken,
    ) -> Result<ProcessOutput, QueryError> {
        if cancel_token.is_cancelled() {
            return Err(QueryError::Cancelled);
        }

        // kill_on_drop: abandoning the run future below terminates jq
        let mut child = Command::new(&self.program)
            .args(self.build_args(request))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| QueryError::SpawnFailed(e.to_string()))?;

        let stdin = child.stdin.take();
        let document = request.shared_document();

        // Feed stdin while draining stdout/stderr so big documents can't fill both pipes
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(document.as_bytes()).await {
                // jq exits without reading its input when the query doesn't parse
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        };

        let run = async move {
            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            let output = output.map_err(|e| QueryError::OutputReadFailed(e.to_string()))?;
            fed.map_err(|e| QueryError::InputWriteFailed(e.to_string()))?;

            Ok(ProcessOutput {
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        };

        let limited = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, run)
                    .await
                    .unwrap_or(Err(QueryError::TimedOut(limit))),
                None => run.await,
            }
        };

        tokio::select! {
            biased;

            _ = cancel_token.cancelled() => {
                log::debug!("jq run cancelled for query: {}", request.query());
                Err(QueryError::Cancelled)
            }
            result = limited => result,
        }
    }
}

impl QueryInvoker for JqExecutor {
    fn invoke(
        &self,
        request: &QueryRequest,
        cancel_token: &CancellationToken,
    ) -> impl Future<Output = Result<ProcessOutput, QueryError>> + Send {
        self.execute_with_cancel(request, cancel_token)
    }
}

fn push_format_args(args: &mut Vec<String>, options: FormattingOptions) {
    let indentation = options.indentation;
    if indentation.is_compact() {
        args.push("--compact-output".to_string());
    } else if indentation.uses_tab() {
        args.push("--tab".to_string());
    } else if let Some(width) = indentation.indent_width() {
        args.push("--indent".to_string());
        args.push(width.to_string());
    }

    if options.sort_keys {
        args.push("--sort-keys".to_string());
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;
