// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::DispatchError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BarrierState {
    outstanding: usize,
    signalled: usize,
}

/// Counting barrier the main flow waits on until every registration is signalled
///
/// Clones share one counter. `register` and `signal` may be called
/// concurrently from any number of tasks: every update goes through the lock
/// inside the watch channel, and waiters are woken on each change.
#[derive(Debug, Clone)]
pub struct CompletionBarrier {
    state: Arc<watch::Sender<BarrierState>>,
}

impl CompletionBarrier {
    pub fn new() -> Self {
        let (state, _) = watch::channel(BarrierState::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Add one expected signal
    pub fn register(&self) {
        self.state.send_modify(|state| state.outstanding += 1);
    }

    /// Register and return a guard that signals exactly once when dropped
    pub fn register_guard(&self) -> SignalGuard {
        self.register();
        SignalGuard {
            barrier: self.clone(),
        }
    }

    /// Match one registration
    pub fn signal(&self) -> Result<(), DispatchError> {
        let mut result = Ok(());
        self.state.send_if_modified(|state| {
            if state.outstanding == 0 {
                result = Err(DispatchError::BarrierUnderflow);
                return false;
            }
            state.outstanding -= 1;
            state.signalled += 1;
            true
        });
        result
    }

    /// Block until the outstanding count is zero
    /// Returns immediately if nothing is registered.
    pub async fn wait(&self) {
        let mut rx = self.state.subscribe();
        // The sender outlives this call, so the only way out is a zero count.
        let _ = rx.wait_for(|state| state.outstanding == 0).await;
    }

    /// Registrations not yet matched by a signal
    pub fn outstanding(&self) -> usize {
        self.state.borrow().outstanding
    }

    /// Total signals received since creation
    pub fn signalled(&self) -> usize {
        self.state.borrow().signalled
    }
}

impl Default for CompletionBarrier {
    fn default() -> Self {
        Self::new()
    }
}

/// One registration on a [`CompletionBarrier`], signalled on drop
///
/// Holding the guard across a receive means the barrier is signalled on every
/// exit path of the holder, including early returns and task cancellation.
#[must_use = "dropping the guard signals the barrier immediately"]
#[derive(Debug)]
pub struct SignalGuard {
    barrier: CompletionBarrier,
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.barrier.signal() {
            warn!(error = %e, "Signal guard found no registration to match");
        }
    }
}
