// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::rendezvous_channel::{rendezvous, RendezvousReceiver};
use dispatch_ack_core::{AckSink, DispatchError, Transport, WorkItem};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::time::Duration;

type AckCallback =
    Box<dyn FnOnce(Duration) -> BoxFuture<'static, Result<(), DispatchError>> + Send>;

/// Acknowledgment procedure: the worker calls it and never sees what it reports to
pub struct AckFn(AckCallback);

impl AckFn {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Duration) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), DispatchError>> + Send + 'static,
    {
        Self(Box::new(move |duration| f(duration).boxed()))
    }
}

impl AckSink<Duration> for AckFn {
    async fn ack(self, value: Duration) -> Result<(), DispatchError> {
        (self.0)(value).await
    }
}

impl WorkItem for AckFn {
    type Sink = Self;

    fn describe(&self) -> String {
        "received ack function".to_string()
    }

    fn into_task(self, assigned: Duration) -> (Duration, Self::Sink) {
        (assigned, self)
    }
}

/// Channel-in-closure: each item closes over its own private ack channel
/// Collector `i` reads the channel captured by the `i`-th dispatched closure.
#[derive(Default)]
pub struct ClosureTransport {
    receivers: Vec<RendezvousReceiver<Duration>>,
}

impl ClosureTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ClosureTransport {
    type Item = AckFn;
    type Receiver = RendezvousReceiver<Duration>;

    fn name(&self) -> &'static str {
        "chan-in-closure"
    }

    fn make_item(&mut self, _index: usize, _duration: Duration) -> Self::Item {
        let (ack_tx, ack_rx) = rendezvous("ack");
        self.receivers.push(ack_rx);
        AckFn::new(move |duration| async move { ack_tx.send(duration).await })
    }

    fn into_receivers(self, _collectors: usize) -> Vec<Self::Receiver> {
        self.receivers
    }
}
