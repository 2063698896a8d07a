// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use dispatch_ack_core::WorkerRuntime;
use std::future::Future;
use tokio::task::{self, JoinError, JoinHandle};

/// Tokio task-based runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRuntime;

impl WorkerRuntime for TokioRuntime {
    type Handle<T: Send + 'static> = JoinHandle<T>;
    type Error = JoinError;

    fn spawn<F, Fut>(f: F) -> Self::Handle<Fut::Output>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        task::spawn(f())
    }

    async fn join<T: Send + 'static>(handle: Self::Handle<T>) -> Result<T, Self::Error> {
        handle.await
    }
}
