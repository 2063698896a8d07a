// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use dispatch_ack_core::{
    AckCollector, AckReceiver, AckSink, CompletionBarrier, DispatchError, TokioTimer, WorkItem,
    WorkReceiver, Worker,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::time::{timeout, Instant};

// ============================================================
// Test doubles
// ============================================================

struct OneshotSink(oneshot::Sender<Duration>);

impl AckSink<Duration> for OneshotSink {
    async fn ack(self, value: Duration) -> Result<(), DispatchError> {
        self.0
            .send(value)
            .map_err(|_| DispatchError::Disconnected("ack"))
    }
}

struct QueueReceiver<T>(mpsc::Receiver<T>);

#[async_trait]
impl<T: Send + 'static> WorkReceiver<T> for QueueReceiver<T> {
    async fn recv(&mut self) -> Option<T> {
        self.0.recv().await
    }
}

#[async_trait]
impl<T: Send + 'static> AckReceiver<T> for QueueReceiver<T> {
    async fn recv(&mut self) -> Option<T> {
        self.0.recv().await
    }
}

/// Receiver shared between clones that counts how often it was read
struct SharedReceiver<T> {
    rx: Arc<Mutex<mpsc::Receiver<T>>>,
    receives: Arc<AtomicUsize>,
}

impl<T> Clone for SharedReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
            receives: Arc::clone(&self.receives),
        }
    }
}

impl<T> SharedReceiver<T> {
    fn new(rx: mpsc::Receiver<T>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
            receives: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn receives(&self) -> usize {
        self.receives.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Send + 'static> WorkReceiver<T> for SharedReceiver<T> {
    async fn recv(&mut self) -> Option<T> {
        self.receives.fetch_add(1, Ordering::SeqCst);
        self.rx.lock().await.recv().await
    }
}

struct TestItem {
    own_duration: Option<Duration>,
    sink: OneshotSink,
}

impl WorkItem for TestItem {
    type Sink = OneshotSink;

    fn describe(&self) -> String {
        "received test item".to_string()
    }

    fn into_task(self, assigned: Duration) -> (Duration, Self::Sink) {
        (self.own_duration.unwrap_or(assigned), self.sink)
    }
}

fn item(own_duration: Option<Duration>) -> (TestItem, oneshot::Receiver<Duration>) {
    let (tx, rx) = oneshot::channel();
    (
        TestItem {
            own_duration,
            sink: OneshotSink(tx),
        },
        rx,
    )
}

// ============================================================
// Worker
// ============================================================

#[tokio::test(start_paused = true)]
async fn test_worker_acknowledges_its_assigned_duration_after_working() {
    let (dispatch_tx, dispatch_rx) = mpsc::channel(1);
    let (work, ack_rx) = item(None);
    dispatch_tx.send(work).await.unwrap();

    let started = Instant::now();
    let worker = Worker::new(1, Duration::from_secs(3));
    let reported = worker
        .run::<_, TestItem, _>(QueueReceiver(dispatch_rx), TokioTimer)
        .await
        .unwrap();

    assert_eq!(reported, Duration::from_secs(3));
    assert_eq!(ack_rx.await.unwrap(), Duration::from_secs(3));
    assert!(started.elapsed() >= Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_item_duration_overrides_the_assigned_one() {
    let (dispatch_tx, dispatch_rx) = mpsc::channel(1);
    let (work, ack_rx) = item(Some(Duration::from_secs(5)));
    dispatch_tx.send(work).await.unwrap();

    let worker = Worker::new(2, Duration::from_secs(1));
    let reported = worker
        .run::<_, TestItem, _>(QueueReceiver(dispatch_rx), TokioTimer)
        .await
        .unwrap();

    assert_eq!(reported, Duration::from_secs(5));
    assert_eq!(ack_rx.await.unwrap(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_worker_takes_exactly_one_item() {
    let (dispatch_tx, dispatch_rx) = mpsc::channel(2);
    let (first, first_ack) = item(None);
    let (second, _second_ack) = item(None);
    dispatch_tx.send(first).await.unwrap();
    dispatch_tx.send(second).await.unwrap();

    let shared = SharedReceiver::new(dispatch_rx);
    let worker = Worker::new(1, Duration::from_secs(1));
    worker
        .run::<_, TestItem, _>(shared.clone(), TokioTimer)
        .await
        .unwrap();

    assert_eq!(shared.receives(), 1);
    assert!(first_ack.await.is_ok());
    assert!(
        shared.rx.lock().await.try_recv().is_ok(),
        "The second item should still be waiting for another worker"
    );
}

#[tokio::test(start_paused = true)]
async fn test_worker_reports_closed_dispatch_channel() {
    let (dispatch_tx, dispatch_rx) = mpsc::channel::<TestItem>(1);
    drop(dispatch_tx);

    let worker = Worker::new(1, Duration::from_secs(1));
    let result = worker
        .run::<_, TestItem, _>(QueueReceiver(dispatch_rx), TokioTimer)
        .await;

    assert_eq!(result, Err(DispatchError::Disconnected("dispatch")));
}

#[tokio::test(start_paused = true)]
async fn test_worker_reports_undeliverable_acknowledgment() {
    let (dispatch_tx, dispatch_rx) = mpsc::channel(1);
    let (work, ack_rx) = item(None);
    drop(ack_rx);
    dispatch_tx.send(work).await.unwrap();

    let worker = Worker::new(1, Duration::from_secs(1));
    let result = worker
        .run::<_, TestItem, _>(QueueReceiver(dispatch_rx), TokioTimer)
        .await;

    assert_eq!(result, Err(DispatchError::Disconnected("ack")));
}

// ============================================================
// AckCollector
// ============================================================

#[tokio::test(start_paused = true)]
async fn test_collector_returns_the_value_and_signals_once() {
    let barrier = CompletionBarrier::new();
    let (ack_tx, ack_rx) = mpsc::channel(1);
    ack_tx.send(Duration::from_secs(4)).await.unwrap();

    let collector = AckCollector::new(1);
    let received = collector
        .run(QueueReceiver(ack_rx), barrier.register_guard())
        .await;

    assert_eq!(received, Some(Duration::from_secs(4)));
    assert_eq!(barrier.outstanding(), 0);
    assert_eq!(barrier.signalled(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_collector_signals_even_when_channel_closes_empty() {
    let barrier = CompletionBarrier::new();
    let (ack_tx, ack_rx) = mpsc::channel::<Duration>(1);
    drop(ack_tx);

    let collector = AckCollector::new(1);
    let received = collector
        .run(QueueReceiver(ack_rx), barrier.register_guard())
        .await;

    assert_eq!(received, None);
    assert_eq!(barrier.signalled(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_collector_holds_barrier_until_value_arrives() {
    let barrier = CompletionBarrier::new();
    let (ack_tx, ack_rx) = mpsc::channel(1);

    let collector = AckCollector::new(1);
    let registration = barrier.register_guard();
    let task = tokio::spawn(collector.run(QueueReceiver(ack_rx), registration));

    assert!(timeout(Duration::from_secs(30), barrier.wait()).await.is_err());

    ack_tx.send(Duration::from_secs(2)).await.unwrap();
    barrier.wait().await;
    assert_eq!(task.await.unwrap(), Some(Duration::from_secs(2)));
}

#[tokio::test(start_paused = true)]
async fn test_aborted_collector_still_signals() {
    let barrier = CompletionBarrier::new();
    let (_ack_tx, ack_rx) = mpsc::channel::<Duration>(1);

    let collector = AckCollector::new(1);
    let registration = barrier.register_guard();
    let task = tokio::spawn(collector.run(QueueReceiver(ack_rx), registration));
    tokio::task::yield_now().await;

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    barrier.wait().await;
    assert_eq!(barrier.signalled(), 1);
}
