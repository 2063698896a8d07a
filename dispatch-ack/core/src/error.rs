// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thiserror::Error;

/// Failures surfaced by the dispatch/acknowledge round
///
/// The protocol itself has no error path: a topology mismatch shows up as a
/// round that never completes, not as one of these variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The other half of a rendezvous went away before the value was taken
    #[error("{0} channel closed before the rendezvous completed")]
    Disconnected(&'static str),

    #[error("completion barrier signalled without a matching registration")]
    BarrierUnderflow,

    #[error("invalid round plan: {0}")]
    InvalidPlan(String),

    #[error("task could not be joined: {0}")]
    Join(String),
}
