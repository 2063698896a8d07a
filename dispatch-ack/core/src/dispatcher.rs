// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    CompletionBarrier, DispatchError, RoundPlan, SignalGuard, Timer, Transport, WorkChannel,
    WorkItem, WorkSender, Worker, WorkerRuntime,
};
use std::marker::PhantomData;
use std::time::Duration;
use tracing::debug;

pub type WorkerOutcome = Result<Duration, DispatchError>;

/// Starts the worker pool and hands each worker one item over the dispatch channel
/// Generic over runtime, dispatch channel and timer
pub struct Dispatcher<RT, CH, TM>
where
    RT: WorkerRuntime,
    CH: WorkChannel,
    TM: Timer + Clone + 'static,
{
    timer: TM,
    _phantom: PhantomData<fn() -> (RT, CH)>,
}

impl<RT, CH, TM> Dispatcher<RT, CH, TM>
where
    RT: WorkerRuntime,
    CH: WorkChannel,
    TM: Timer + Clone + 'static,
{
    pub fn new(timer: TM) -> Self {
        Self {
            timer,
            _phantom: PhantomData,
        }
    }

    /// Start one worker per planned duration, all racing on `dispatch`
    pub fn start_workers<I>(
        &self,
        plan: &RoundPlan,
        dispatch: &CH::Receiver<I>,
    ) -> Vec<RT::Handle<WorkerOutcome>>
    where
        I: WorkItem,
    {
        plan.durations()
            .iter()
            .enumerate()
            .map(|(idx, &duration)| {
                let worker = Worker::new(idx + 1, duration);
                let receiver = dispatch.clone();
                let timer = self.timer.clone();
                RT::spawn(move || worker.run::<_, I, _>(receiver, timer))
            })
            .collect()
    }

    /// Build and send one item per worker
    ///
    /// Each send completes only once some worker has taken the item, and a
    /// barrier registration is taken for its acknowledgment just before the
    /// send. Which worker ends up with which item is not determined here.
    pub async fn dispatch<T>(
        &self,
        transport: &mut T,
        plan: &RoundPlan,
        sender: &CH::Sender<T::Item>,
        barrier: &CompletionBarrier,
    ) -> Result<Vec<SignalGuard>, DispatchError>
    where
        T: Transport,
    {
        let mut registrations = Vec::with_capacity(plan.workers());
        for (idx, &duration) in plan.durations().iter().enumerate() {
            let item = transport.make_item(idx + 1, duration);
            registrations.push(barrier.register_guard());
            sender.send_work(item).await?;
            debug!(slot = idx + 1, transport = transport.name(), "Item dispatched");
        }
        Ok(registrations)
    }
}
