// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::Display;
use std::future::Future;

/// Trait for abstracting how workers and collectors are run (tasks, threads)
pub trait WorkerRuntime: Send + 'static {
    type Handle<T: Send + 'static>: Send;
    type Error: Display + Send;

    /// Spawn a worker task
    fn spawn<F, Fut>(f: F) -> Self::Handle<Fut::Output>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static;

    /// Wait for the task to complete and hand back its output
    fn join<T: Send + 'static>(
        handle: Self::Handle<T>,
    ) -> impl Future<Output = Result<T, Self::Error>> + Send;
}
