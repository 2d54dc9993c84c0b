//! Query execution pipeline
//!
//! Every edit to the document, the query, or the formatting options becomes an
//! immutable [`QueryRequest`]. The [`ExecutionGate`] cancels whatever request
//! was in flight, waits for the single execution permit, and hands the request
//! to a [`QueryInvoker`] (jq in production) on the async runtime. The
//! [`ResultPublisher`] applies the outcome to the shared [`OutputView`] only if
//! the request is still the current one.
//!
//! There is no timer-based debounce: bursts of edits start and cancel many
//! requests, and only the last one runs to completion uncontested.

pub mod controller;
pub mod executor;
pub mod gate;
pub mod handle;
pub mod publisher;
pub mod request;
pub mod types;

pub use controller::{QueryController, Trigger};
pub use executor::{JqExecutor, QueryInvoker};
pub use gate::{ExecutionGate, Submission};
pub use handle::{ExecutionHandle, HandleSlot};
pub use publisher::{OutputState, OutputView, ResultPublisher, StatusLine};
pub use request::QueryRequest;
pub use types::{GateError, Outcome, ProcessOutput, QueryError};
