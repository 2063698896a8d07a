// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod error;
pub use error::DispatchError;

pub mod ack_sink;
pub use ack_sink::{AckReceiver, AckSink};

pub mod work_item;
pub use work_item::WorkItem;

pub mod transport;
pub use transport::Transport;

pub mod work_channel;
pub use work_channel::{WorkChannel, WorkReceiver, WorkSender};

pub mod worker_runtime;
pub use worker_runtime::WorkerRuntime;

pub mod timer;
pub use timer::Timer;

pub mod tokio_timer;
pub use tokio_timer::TokioTimer;

mod completion_barrier;
pub use completion_barrier::{CompletionBarrier, SignalGuard};

mod round_plan;
pub use round_plan::RoundPlan;

mod worker;
pub use worker::Worker;

mod ack_collector;
pub use ack_collector::AckCollector;

mod dispatcher;
pub use dispatcher::Dispatcher;

mod orchestrator;
pub use orchestrator::{Orchestrator, RoundReport};
