// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::AckSink;
use std::time::Duration;

/// What a worker takes off the dispatch channel
///
/// Implementations differ only in how the acknowledgment capability travels:
/// as a bare channel handle, wrapped in a closure, or embedded in a record.
pub trait WorkItem: Send + 'static {
    type Sink: AckSink<Duration>;

    /// Short trace note logged by the worker that received this item
    fn describe(&self) -> String;

    /// Split into the work duration and the sink to report it through
    /// `assigned` is the duration the receiving worker was started with;
    /// items that carry their own duration ignore it.
    fn into_task(self, assigned: Duration) -> (Duration, Self::Sink);
}
