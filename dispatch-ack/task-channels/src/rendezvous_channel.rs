// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use dispatch_ack_core::{
    AckReceiver, AckSink, DispatchError, WorkChannel, WorkReceiver, WorkSender,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex};

/// A value paired with the notice that a receiver has taken it
type Envelope<T> = (T, oneshot::Sender<()>);

/// Create an unbuffered multi-producer, multi-consumer channel
///
/// `send` resolves only after some receiver has taken the value. Receivers
/// are clones over one queue and race for each value. `name` labels
/// disconnection errors.
pub fn rendezvous<T: Send>(name: &'static str) -> (RendezvousSender<T>, RendezvousReceiver<T>) {
    let (tx, rx) = mpsc::channel(1);
    (
        RendezvousSender { name, tx },
        RendezvousReceiver {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

pub struct RendezvousSender<T> {
    name: &'static str,
    tx: mpsc::Sender<Envelope<T>>,
}

impl<T> Clone for RendezvousSender<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            tx: self.tx.clone(),
        }
    }
}

impl<T: Send> RendezvousSender<T> {
    /// Send `value` and wait until a receiver has taken it
    pub async fn send(&self, value: T) -> Result<(), DispatchError> {
        let (taken_tx, taken_rx) = oneshot::channel();
        self.tx
            .send((value, taken_tx))
            .await
            .map_err(|_| DispatchError::Disconnected(self.name))?;
        // Dropped unread when every receiver goes away with the value still queued.
        taken_rx
            .await
            .map_err(|_| DispatchError::Disconnected(self.name))
    }
}

pub struct RendezvousReceiver<T> {
    rx: Arc<Mutex<mpsc::Receiver<Envelope<T>>>>,
}

impl<T> Clone for RendezvousReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

impl<T: Send> RendezvousReceiver<T> {
    /// Take the next value, releasing its sender
    /// Returns None once every sender is gone and the queue is empty
    pub async fn recv(&self) -> Option<T> {
        let (value, taken) = {
            let mut rx = self.rx.lock().await;
            rx.recv().await?
        };
        let _ = taken.send(());
        Some(value)
    }
}

impl<I: Send + 'static> WorkSender<I> for RendezvousSender<I> {
    async fn send_work(&self, item: I) -> Result<(), DispatchError> {
        self.send(item).await
    }
}

#[async_trait]
impl<I: Send + 'static> WorkReceiver<I> for RendezvousReceiver<I> {
    async fn recv(&mut self) -> Option<I> {
        RendezvousReceiver::recv(self).await
    }
}

impl<T: Send + 'static> AckSink<T> for RendezvousSender<T> {
    async fn ack(self, value: T) -> Result<(), DispatchError> {
        self.send(value).await
    }
}

#[async_trait]
impl<T: Send + 'static> AckReceiver<T> for RendezvousReceiver<T> {
    async fn recv(&mut self) -> Option<T> {
        RendezvousReceiver::recv(self).await
    }
}

/// Dispatch channel built on [`rendezvous`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RendezvousWorkChannel;

impl WorkChannel for RendezvousWorkChannel {
    type Sender<I: Send + 'static> = RendezvousSender<I>;
    type Receiver<I: Send + 'static> = RendezvousReceiver<I>;

    fn create_pair<I: Send + 'static>() -> (Self::Sender<I>, Self::Receiver<I>) {
        rendezvous("dispatch")
    }
}
