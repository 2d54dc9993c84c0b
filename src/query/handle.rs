//! Execution handles and the single "current" slot
//!
//! The slot is the only place that decides which request may still publish.
//! Installing a handle cancels the previous one; publishing retires the
//! current handle while holding the slot lock, so a submit can never slip in
//! between the currency check and the write to the output view.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use super::types::GateError;

/// One dispatched request and its cancellation signal
#[derive(Debug, Clone)]
pub struct ExecutionHandle {
    request_id: u64,
    cancel_token: CancellationToken,
}

impl ExecutionHandle {
    pub fn new(request_id: u64, cancel_token: CancellationToken) -> Self {
        Self {
            request_id,
            cancel_token,
        }
    }

    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

#[derive(Debug, Default)]
struct SlotState {
    current: Option<ExecutionHandle>,
    disposed: bool,
}

/// Holder of the one current handle per pipeline
#[derive(Debug, Default)]
pub struct HandleSlot {
    state: Mutex<SlotState>,
}

impl HandleSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make `handle` current, cancelling whatever it replaces
    pub fn install(&self, handle: ExecutionHandle) -> Result<(), GateError> {
        let mut state = self.lock();
        if state.disposed {
            return Err(GateError::Disposed);
        }

        if let Some(previous) = state.current.replace(handle) {
            previous.cancel();
            log::debug!("Cancelled request {}", previous.request_id);
        }
        Ok(())
    }

    /// Cancel and forget the current handle, returning its request id
    pub fn cancel_current(&self) -> Option<u64> {
        let previous = self.lock().current.take()?;
        previous.cancel();
        log::debug!("Cancelled request {}", previous.request_id);
        Some(previous.request_id)
    }

    pub fn current_id(&self) -> Option<u64> {
        self.lock().current.as_ref().map(|h| h.request_id)
    }

    pub fn is_current(&self, handle: &ExecutionHandle) -> bool {
        let state = self.lock();
        Self::still_current(&state, handle)
    }

    /// Run `apply` only if `handle` is still current and uncancelled
    ///
    /// The handle is retired before `apply` runs and the slot stays locked for
    /// its duration. Returns None when the handle was stale.
    pub fn retire_if_current<R>(
        &self,
        handle: &ExecutionHandle,
        apply: impl FnOnce() -> R,
    ) -> Option<R> {
        let mut state = self.lock();
        if !Self::still_current(&state, handle) {
            return None;
        }
        state.current = None;
        Some(apply())
    }

    /// Refuse further installs and cancel the current handle
    pub fn dispose(&self) {
        let mut state = self.lock();
        state.disposed = true;
        if let Some(previous) = state.current.take() {
            previous.cancel();
            log::debug!("Cancelled request {} on dispose", previous.request_id);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    fn still_current(state: &SlotState, handle: &ExecutionHandle) -> bool {
        !state.disposed
            && !handle.is_cancelled()
            && state
                .current
                .as_ref()
                .is_some_and(|current| current.request_id == handle.request_id)
    }
}
