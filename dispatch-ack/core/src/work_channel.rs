// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::DispatchError;
use async_trait::async_trait;
use std::future::Future;

/// Sending half of the dispatch channel
pub trait WorkSender<I>: Send + Sync + 'static {
    /// Send a work item
    /// Resolves once a worker has taken it off the channel
    fn send_work(&self, item: I) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// Trait for receiving work items asynchronously
#[async_trait]
pub trait WorkReceiver<I>: Send + 'static {
    /// Receive the next work item
    /// Returns None if the channel is closed
    async fn recv(&mut self) -> Option<I>;
}

/// Factory for the shared dispatch channel
/// Receivers are cloned so that every worker races on the same queue
pub trait WorkChannel: Send + 'static {
    type Sender<I: Send + 'static>: WorkSender<I>;
    type Receiver<I: Send + 'static>: WorkReceiver<I> + Clone;

    fn create_pair<I: Send + 'static>() -> (Self::Sender<I>, Self::Receiver<I>);
}
