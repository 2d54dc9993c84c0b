//! Execution Gate
//!
//! Serializes query runs so at most one jq process is alive per gate. Each
//! submit cancels the previous request, then spawns a task that waits for the
//! single execution permit. The wait races against the request's own
//! cancellation, so a superseded request gives up without ever starting jq.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::executor::QueryInvoker;
use super::handle::{ExecutionHandle, HandleSlot};
use super::publisher::{OutputView, ResultPublisher};
use super::request::QueryRequest;
use super::types::{GateError, Outcome, ProcessOutput, QueryError};

/// A request accepted by the gate
///
/// Dropping it does not cancel the request; the gate still runs and publishes it.
#[derive(Debug)]
pub struct Submission {
    request_id: u64,
    join: JoinHandle<Outcome>,
}

impl Submission {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Wait for the request to reach a terminal state
    pub async fn outcome(self) -> Outcome {
        match self.join.await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Request {} task failed: {}", self.request_id, e);
                Outcome::Cancelled
            }
        }
    }
}

/// Single-flight executor for query requests
pub struct ExecutionGate<I: QueryInvoker> {
    invoker: Arc<I>,
    permits: Arc<Semaphore>,
    slot: Arc<HandleSlot>,
    publisher: ResultPublisher,
    runtime: Handle,
    shutdown: CancellationToken,
    tracker: TaskTracker,
    /// Starts at 1 so 0 never names a request
    next_request_id: AtomicU64,
}

impl<I: QueryInvoker> ExecutionGate<I> {
    /// Create a gate that spawns runs onto `runtime` and publishes into `view`
    pub fn new(invoker: I, view: OutputView, runtime: Handle) -> Self {
        let slot = Arc::new(HandleSlot::new());
        let publisher = ResultPublisher::new(Arc::clone(&slot), view);

        Self {
            invoker: Arc::new(invoker),
            permits: Arc::new(Semaphore::new(1)),
            slot,
            publisher,
            runtime,
            shutdown: CancellationToken::new(),
            tracker: TaskTracker::new(),
            next_request_id: AtomicU64::new(1),
        }
    }

    pub fn output(&self) -> &OutputView {
        self.publisher.view()
    }

    /// Supersede any in-flight request and schedule `request`
    ///
    /// Returns immediately; the run happens on the runtime.
    pub fn submit(&self, request: QueryRequest) -> Result<Submission, GateError> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let handle = ExecutionHandle::new(request_id, self.shutdown.child_token());

        self.slot.install(handle.clone())?;
        log::debug!(
            "Dispatching request {} for query: {}",
            request_id,
            request.query()
        );

        let task = run_request(
            Arc::clone(&self.invoker),
            Arc::clone(&self.permits),
            self.publisher.clone(),
            handle,
            request,
        );
        let join = self.tracker.spawn_on(task, &self.runtime);

        Ok(Submission { request_id, join })
    }

    /// Cancel in-flight request if any
    pub fn cancel_in_flight(&self) {
        self.slot.cancel_current();
    }

    /// Check if a request is dispatched and not yet published or cancelled
    pub fn is_pending(&self) -> bool {
        self.slot.current_id().is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.slot.is_disposed()
    }

    /// Cancel everything and refuse further submissions
    ///
    /// Runs that are already past their currency check may still finish, but
    /// none of them can publish afterwards.
    pub fn dispose(&self) {
        if self.slot.is_disposed() {
            return;
        }
        log::debug!("Disposing execution gate");
        self.slot.dispose();
        self.shutdown.cancel();
        self.permits.close();
        self.tracker.close();
    }

    /// Dispose and wait for every spawned run to finish
    pub async fn shutdown(&self) {
        self.dispose();
        self.tracker.wait().await;
    }
}

impl<I: QueryInvoker> Drop for ExecutionGate<I> {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn run_request<I: QueryInvoker>(
    invoker: Arc<I>,
    permits: Arc<Semaphore>,
    publisher: ResultPublisher,
    handle: ExecutionHandle,
    request: QueryRequest,
) -> Outcome {
    let request_id = handle.request_id();

    let permit = tokio::select! {
        biased;

        _ = handle.cancel_token().cancelled() => {
            log::debug!("Request {} superseded while waiting for permit", request_id);
            return Outcome::SupersededBeforeStart;
        }
        permit = permits.acquire_owned() => match permit {
            Ok(permit) => permit,
            // Closed on dispose
            Err(_) => return Outcome::SupersededBeforeStart,
        },
    };

    // The permit may have been granted in the same instant the handle was cancelled
    if handle.is_cancelled() {
        log::debug!("Request {} superseded before start", request_id);
        return Outcome::SupersededBeforeStart;
    }

    log::debug!("Request {} running", request_id);
    let publication = PublishOnDrop::new(publisher, handle);
    let result = invoker
        .invoke(&request, publication.handle.cancel_token())
        .await;
    let outcome = publication.publish(result);
    drop(permit);

    log::debug!("Request {} finished: {:?}", request_id, outcome);
    outcome
}

/// Publishes the run's result exactly once
///
/// If the task is torn down before `publish` (a panicking invoker), the drop
/// publishes `QueryError::Aborted` so the handle does not stay current.
struct PublishOnDrop {
    publisher: ResultPublisher,
    handle: ExecutionHandle,
    published: bool,
}

impl PublishOnDrop {
    fn new(publisher: ResultPublisher, handle: ExecutionHandle) -> Self {
        Self {
            publisher,
            handle,
            published: false,
        }
    }

    fn publish(mut self, result: Result<ProcessOutput, QueryError>) -> Outcome {
        self.published = true;
        self.publisher.publish(&self.handle, result)
    }
}

impl Drop for PublishOnDrop {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        log::error!(
            "Request {} ended without a result",
            self.handle.request_id()
        );
        self.publisher.publish(&self.handle, Err(QueryError::Aborted));
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod gate_tests;
