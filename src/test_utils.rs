//! Shared test utilities for jqpanel
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use std::future::Future;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio::runtime::Handle;
    use tokio_util::sync::CancellationToken;

    use crate::app::App;
    use crate::query::{
        ExecutionGate, OutputView, ProcessOutput, QueryController, QueryError, QueryInvoker,
        QueryRequest,
    };
    use crate::settings::MemorySettings;

    /// Test fixture JSON data
    pub const TEST_JSON: &str = r#"{"a": 1, "b": 2, "name": "test"}"#;

    /// Path to jq, or None (with a note on stderr) when it isn't installed
    pub fn jq_or_skip() -> Option<PathBuf> {
        match which::which("jq") {
            Ok(path) => Some(path),
            Err(_) => {
                eprintln!("jq not found in PATH, skipping");
                None
            }
        }
    }

    /// Counters shared between a `FakeInvoker` and the test that owns it
    #[derive(Debug, Default)]
    pub struct InvokeStats {
        active: AtomicUsize,
        max_active: AtomicUsize,
        started: Mutex<Vec<QueryRequest>>,
    }

    impl InvokeStats {
        fn enter(&self, request: &QueryRequest) {
            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(active, Ordering::SeqCst);
            self.started.lock().unwrap().push(request.clone());
        }

        fn exit(&self) {
            self.active.fetch_sub(1, Ordering::SeqCst);
        }

        /// Highest number of simultaneous runs observed
        pub fn max_active(&self) -> usize {
            self.max_active.load(Ordering::SeqCst)
        }

        /// Queries in the order their runs started
        pub fn started_queries(&self) -> Vec<String> {
            self.started
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.query().to_string())
                .collect()
        }

        pub fn started_requests(&self) -> Vec<QueryRequest> {
            self.started.lock().unwrap().clone()
        }
    }

    /// Scripted stand-in for jq
    ///
    /// Query prefixes select the behavior:
    /// - `fail:` - the process cannot be spawned
    /// - `exit:` - exits 3 with `boom` on stderr
    /// - `warn:` - succeeds with `careful` on stderr
    /// - `slow:` - uses the slow delay instead of the normal one
    /// - `panic:` - panics once its delay elapses
    ///
    /// Any query containing `stubborn` ignores cancellation until its delay
    /// elapses.
    ///
    /// Successful runs print `<query>|<document>`.
    #[derive(Debug, Clone)]
    pub struct FakeInvoker {
        delay: Duration,
        slow_delay: Duration,
        stats: Arc<InvokeStats>,
    }

    impl FakeInvoker {
        pub fn new(delay: Duration) -> Self {
            Self {
                delay,
                slow_delay: delay,
                stats: Arc::new(InvokeStats::default()),
            }
        }

        /// Delay used for queries prefixed with `slow:`
        pub fn with_slow_delay(mut self, slow_delay: Duration) -> Self {
            self.slow_delay = slow_delay;
            self
        }

        pub fn stats(&self) -> Arc<InvokeStats> {
            Arc::clone(&self.stats)
        }

        fn respond(request: &QueryRequest) -> Result<ProcessOutput, QueryError> {
            let query = request.query();
            if query.starts_with("fail:") {
                return Err(QueryError::SpawnFailed("No such file or directory".to_string()));
            }
            if query.starts_with("panic:") {
                panic!("scripted invoker panic");
            }
            if query.starts_with("exit:") {
                return Ok(ProcessOutput {
                    exit_code: Some(3),
                    stdout: String::new(),
                    stderr: "boom".to_string(),
                });
            }
            Ok(ProcessOutput {
                exit_code: Some(0),
                stdout: format!("{}|{}", query, request.document()),
                stderr: if query.starts_with("warn:") {
                    "careful".to_string()
                } else {
                    String::new()
                },
            })
        }
    }

    impl QueryInvoker for FakeInvoker {
        fn invoke(
            &self,
            request: &QueryRequest,
            cancel_token: &CancellationToken,
        ) -> impl Future<Output = Result<ProcessOutput, QueryError>> + Send {
            let request = request.clone();
            let cancel_token = cancel_token.clone();
            let stats = Arc::clone(&self.stats);
            let delay = if request.query().starts_with("slow:") {
                self.slow_delay
            } else {
                self.delay
            };

            async move {
                if cancel_token.is_cancelled() {
                    return Err(QueryError::Cancelled);
                }

                stats.enter(&request);
                let result = if request.query().contains("stubborn") {
                    tokio::time::sleep(delay).await;
                    Self::respond(&request)
                } else {
                    tokio::select! {
                        biased;
                        _ = cancel_token.cancelled() => Err(QueryError::Cancelled),
                        _ = tokio::time::sleep(delay) => Self::respond(&request),
                    }
                };
                stats.exit();
                result
            }
        }
    }

    /// App over a `FakeInvoker` with the identity query already submitted
    ///
    /// Must be called inside a tokio runtime.
    pub fn test_app(json: &str) -> App<FakeInvoker> {
        test_app_with_query(json, ".")
    }

    pub fn test_app_with_query(json: &str, query: &str) -> App<FakeInvoker> {
        let invoker = FakeInvoker::new(Duration::from_millis(10));
        let gate = ExecutionGate::new(invoker, OutputView::new(), Handle::current());
        let controller = QueryController::new(gate, Box::new(MemorySettings::default()));
        App::new(controller, json.to_string(), query.to_string(), false)
    }

    /// Wait until the app has no run in flight
    pub async fn settle<I: QueryInvoker>(app: &App<I>) {
        while app.controller.is_pending() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    pub fn render_to_string<I: QueryInvoker>(app: &mut App<I>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal.backend().to_string()
    }
}
