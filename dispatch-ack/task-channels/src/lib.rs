// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod rendezvous_channel;
pub use rendezvous_channel::{
    rendezvous, RendezvousReceiver, RendezvousSender, RendezvousWorkChannel,
};

pub mod channel_transport;
pub use channel_transport::ChannelTransport;

pub mod closure_transport;
pub use closure_transport::{AckFn, ClosureTransport};

pub mod struct_transport;
pub use struct_transport::{Process, StructTransport};

pub mod tokio_runtime;
pub use tokio_runtime::TokioRuntime;

pub mod config;
pub use config::{Config, ConfigError, TransportKind};

use dispatch_ack_core::{DispatchError, Orchestrator, RoundPlan, RoundReport, TokioTimer};

/// Orchestrator wired to tokio tasks, rendezvous channels and the tokio clock
pub type TaskOrchestrator = Orchestrator<TokioRuntime, RendezvousWorkChannel, TokioTimer>;

/// Run one round over the chosen transport
pub async fn run_round(
    kind: TransportKind,
    plan: &RoundPlan,
) -> Result<RoundReport, DispatchError> {
    let orchestrator = TaskOrchestrator::new(TokioTimer);
    match kind {
        TransportKind::Channel => orchestrator.run(ChannelTransport::new(), plan).await,
        TransportKind::Closure => orchestrator.run(ClosureTransport::new(), plan).await,
        TransportKind::Struct => orchestrator.run(StructTransport::new(), plan).await,
    }
}
