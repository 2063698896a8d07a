// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::rendezvous_channel::{rendezvous, RendezvousReceiver, RendezvousSender};
use dispatch_ack_core::{Transport, WorkItem};
use std::time::Duration;

/// Record passed over the dispatch channel, carrying its own work duration
///
/// `id` is the dispatch slot. The worker that receives the record is whichever
/// won the race, so `id` need not match the receiving worker.
pub struct Process {
    pub id: usize,
    pub sleep_time: Duration,
    pub ack: RendezvousSender<Duration>,
}

impl WorkItem for Process {
    type Sink = RendezvousSender<Duration>;

    fn describe(&self) -> String {
        format!("received process with id {}", self.id)
    }

    fn into_task(self, _assigned: Duration) -> (Duration, Self::Sink) {
        (self.sleep_time, self.ack)
    }
}

/// Channel-in-struct: one ack channel per record, the record sets the duration
#[derive(Default)]
pub struct StructTransport {
    receivers: Vec<RendezvousReceiver<Duration>>,
}

impl StructTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for StructTransport {
    type Item = Process;
    type Receiver = RendezvousReceiver<Duration>;

    fn name(&self) -> &'static str {
        "chan-in-struct"
    }

    fn make_item(&mut self, index: usize, duration: Duration) -> Self::Item {
        let (ack, ack_rx) = rendezvous("ack");
        self.receivers.push(ack_rx);
        Process {
            id: index,
            sleep_time: duration,
            ack,
        }
    }

    fn into_receivers(self, _collectors: usize) -> Vec<Self::Receiver> {
        self.receivers
    }
}
