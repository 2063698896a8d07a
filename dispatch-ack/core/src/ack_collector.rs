// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{AckReceiver, SignalGuard};
use std::time::Duration;
use tracing::{info, warn};

/// Listener that waits for one acknowledgment and then signals the barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckCollector {
    id: usize,
}

impl AckCollector {
    pub fn new(id: usize) -> Self {
        Self { id }
    }

    /// Receive exactly one value from `ack`
    ///
    /// `registration` is taken before the receive starts and released when
    /// this future finishes or is dropped, so the barrier sees one signal per
    /// collector whichever way the receive ends. With a shared ack channel the
    /// value may come from any worker.
    pub async fn run<R>(self, mut ack: R, registration: SignalGuard) -> Option<Duration>
    where
        R: AckReceiver<Duration>,
    {
        let _registration = registration;
        info!("AckListener {} START", self.id);

        let received = ack.recv().await;
        match received {
            Some(duration) => {
                info!("AckListener {}: a worker slept for {:?}", self.id, duration)
            }
            None => warn!(collector = self.id, "Ack channel closed without a value"),
        }

        info!("AckListener {} COMPLETED", self.id);
        received
    }
}
