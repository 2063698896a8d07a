// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::rendezvous_channel::{rendezvous, RendezvousReceiver, RendezvousSender};
use dispatch_ack_core::{Transport, WorkItem};
use std::time::Duration;

/// Channel-over-channel: every item is a handle to the same shared ack channel
///
/// Workers report the duration they were started with. All collectors race
/// on the one ack channel, so none of them is tied to a particular worker.
pub struct ChannelTransport {
    ack_tx: RendezvousSender<Duration>,
    ack_rx: RendezvousReceiver<Duration>,
}

impl ChannelTransport {
    pub fn new() -> Self {
        let (ack_tx, ack_rx) = rendezvous("ack");
        Self { ack_tx, ack_rx }
    }
}

impl Default for ChannelTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkItem for RendezvousSender<Duration> {
    type Sink = Self;

    fn describe(&self) -> String {
        "received channel!".to_string()
    }

    fn into_task(self, assigned: Duration) -> (Duration, Self::Sink) {
        (assigned, self)
    }
}

impl Transport for ChannelTransport {
    type Item = RendezvousSender<Duration>;
    type Receiver = RendezvousReceiver<Duration>;

    fn name(&self) -> &'static str {
        "chan-in-chan"
    }

    fn make_item(&mut self, _index: usize, _duration: Duration) -> Self::Item {
        self.ack_tx.clone()
    }

    fn into_receivers(self, collectors: usize) -> Vec<Self::Receiver> {
        // Keep one receive end alive even with no collectors so acks block
        // rather than fail.
        vec![self.ack_rx; collectors.max(1)]
    }
}
