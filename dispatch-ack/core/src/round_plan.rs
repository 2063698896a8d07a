// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::DispatchError;
use std::time::Duration;

/// Shape of one dispatch round: a duration per worker and the collector count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPlan {
    durations: Vec<Duration>,
    collectors: usize,
}

impl RoundPlan {
    pub const DEFAULT_WORKERS: usize = 10;
    pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);

    /// One worker per duration, worker `i` (1-based) bound to `durations[i - 1]`
    /// Starts one collector per worker.
    pub fn new(durations: Vec<Duration>) -> Self {
        let collectors = durations.len();
        Self {
            durations,
            collectors,
        }
    }

    /// `workers` workers where worker `i` works for `(i + 1)` units
    pub fn standard(workers: usize, unit: Duration) -> Self {
        let durations = (1..=workers)
            .map(|i| unit.saturating_mul(u32::try_from(i + 1).unwrap_or(u32::MAX)))
            .collect();
        Self::new(durations)
    }

    /// Override the number of collectors started
    /// Anything other than the worker count leaves the round deadlocked.
    pub fn with_collectors(mut self, collectors: usize) -> Self {
        self.collectors = collectors;
        self
    }

    pub fn workers(&self) -> usize {
        self.durations.len()
    }

    pub fn collectors(&self) -> usize {
        self.collectors
    }

    pub fn durations(&self) -> &[Duration] {
        &self.durations
    }

    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.durations.is_empty() {
            return Err(DispatchError::InvalidPlan(
                "at least one worker is required".to_string(),
            ));
        }
        if let Some(index) = self.durations.iter().position(Duration::is_zero) {
            return Err(DispatchError::InvalidPlan(format!(
                "worker {} has a zero duration",
                index + 1
            )));
        }
        if self.collectors > self.durations.len() {
            return Err(DispatchError::InvalidPlan(format!(
                "{} collectors for {} workers",
                self.collectors,
                self.durations.len()
            )));
        }
        Ok(())
    }
}

impl Default for RoundPlan {
    fn default() -> Self {
        Self::standard(Self::DEFAULT_WORKERS, Self::DEFAULT_TIME_UNIT)
    }
}
