// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{AckSink, DispatchError, Timer, WorkItem, WorkReceiver};
use std::time::Duration;
use tracing::{info, warn};

/// A worker performs one unit of delay-bounded work and acknowledges it once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Worker {
    id: usize,
    duration: Duration,
}

impl Worker {
    /// `duration` is fixed when the worker starts, before any item is dispatched
    pub fn new(id: usize, duration: Duration) -> Self {
        Self { id, duration }
    }

    /// Receive one item, work for its duration, then acknowledge through its sink
    /// Returns the duration that was acknowledged.
    pub async fn run<R, I, TM>(
        self,
        mut dispatch: R,
        timer: TM,
    ) -> Result<Duration, DispatchError>
    where
        R: WorkReceiver<I>,
        I: WorkItem,
        TM: Timer,
    {
        info!("Worker {} START", self.id);

        let Some(item) = dispatch.recv().await else {
            warn!(worker = self.id, "Dispatch channel closed before an item arrived");
            return Err(DispatchError::Disconnected("dispatch"));
        };
        drop(dispatch);
        info!("Worker {} {}", self.id, item.describe());

        let (duration, sink) = item.into_task(self.duration);
        timer.sleep(duration).await;

        if let Err(e) = sink.ack(duration).await {
            warn!(worker = self.id, error = %e, "Acknowledgment was not delivered");
            return Err(e);
        }

        info!("Worker {} COMPLETED", self.id);
        Ok(duration)
    }
}
