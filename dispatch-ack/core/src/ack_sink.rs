// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::DispatchError;
use async_trait::async_trait;
use std::future::Future;

/// Single-use, single-value completion sink
///
/// Consuming `self` makes "acknowledge exactly once" a property of the type:
/// a worker that has acknowledged no longer owns a sink to write to.
pub trait AckSink<T>: Send + 'static {
    /// Deliver `value` and resolve once the receiving side has taken it
    fn ack(self, value: T) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// Receive end matching an [`AckSink`]
#[async_trait]
pub trait AckReceiver<T>: Send + 'static {
    /// Receive the next acknowledgment
    /// Returns None once every sink feeding this receiver is gone
    async fn recv(&mut self) -> Option<T>;
}
