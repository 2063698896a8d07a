// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    AckCollector, CompletionBarrier, DispatchError, Dispatcher, RoundPlan, Timer, Transport,
    WorkChannel, WorkerRuntime,
};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// What one completed round observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub transport: &'static str,
    /// Values taken by the collectors, in collector order
    pub acknowledgements: Vec<Duration>,
    /// Values the workers report having acknowledged, in worker order
    pub worker_durations: Vec<Duration>,
    /// Collectors whose ack channel closed without a value
    pub missed_acks: usize,
    pub failed_workers: usize,
    pub elapsed: Duration,
}

/// Orchestrator runs one dispatch-and-acknowledge round
/// Generic over runtime, dispatch channel and timer; the transport is chosen per round
pub struct Orchestrator<RT, CH, TM>
where
    RT: WorkerRuntime,
    CH: WorkChannel,
    TM: Timer + Clone + 'static,
{
    dispatcher: Dispatcher<RT, CH, TM>,
}

impl<RT, CH, TM> Orchestrator<RT, CH, TM>
where
    RT: WorkerRuntime,
    CH: WorkChannel,
    TM: Timer + Clone + 'static,
{
    pub fn new(timer: TM) -> Self {
        Self {
            dispatcher: Dispatcher::new(timer),
        }
    }

    /// Start workers, dispatch one item each, collect every acknowledgment
    ///
    /// Returns once the completion barrier opens. If the plan starts fewer
    /// collectors than workers, at least one registration is never matched
    /// and this future does not complete.
    pub async fn run<T>(
        &self,
        mut transport: T,
        plan: &RoundPlan,
    ) -> Result<RoundReport, DispatchError>
    where
        T: Transport,
    {
        plan.validate()?;
        let started = Instant::now();
        let name = transport.name();
        info!(
            transport = name,
            workers = plan.workers(),
            collectors = plan.collectors(),
            "Starting dispatch round"
        );

        let (sender, receiver) = CH::create_pair::<T::Item>();
        let workers = self.dispatcher.start_workers(plan, &receiver);
        drop(receiver);

        let barrier = CompletionBarrier::new();
        let mut registrations = self
            .dispatcher
            .dispatch(&mut transport, plan, &sender, &barrier)
            .await?;
        drop(sender);

        let mut receivers = transport.into_receivers(plan.collectors());
        let idle_receivers = receivers.split_off(plan.collectors().min(receivers.len()));
        let unclaimed = registrations.split_off(receivers.len());

        let collectors: Vec<_> = receivers
            .into_iter()
            .zip(registrations)
            .enumerate()
            .map(|(idx, (ack, registration))| {
                let collector = AckCollector::new(idx + 1);
                RT::spawn(move || collector.run(ack, registration))
            })
            .collect();

        barrier.wait().await;
        drop(unclaimed);
        drop(idle_receivers);

        let mut acknowledgements = Vec::with_capacity(collectors.len());
        let mut missed_acks = 0;
        for (idx, handle) in collectors.into_iter().enumerate() {
            match RT::join::<Option<Duration>>(handle).await {
                Ok(Some(duration)) => acknowledgements.push(duration),
                Ok(None) => missed_acks += 1,
                Err(e) => {
                    warn!(collector = idx + 1, error = %e, "Collector task failed");
                    return Err(DispatchError::Join(e.to_string()));
                }
            }
        }

        let mut worker_durations = Vec::with_capacity(workers.len());
        let mut failed_workers = 0;
        for (idx, handle) in workers.into_iter().enumerate() {
            match RT::join::<Result<Duration, DispatchError>>(handle).await {
                Ok(Ok(duration)) => worker_durations.push(duration),
                Ok(Err(e)) => {
                    warn!(worker = idx + 1, error = %e, "Worker did not complete");
                    failed_workers += 1;
                }
                Err(e) => {
                    warn!(worker = idx + 1, error = %e, "Worker task failed");
                    failed_workers += 1;
                }
            }
        }

        info!("All Workers COMPLETED");
        Ok(RoundReport {
            transport: name,
            acknowledgements,
            worker_durations,
            missed_acks,
            failed_workers,
            elapsed: started.elapsed(),
        })
    }
}
