// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{AckReceiver, WorkItem};
use std::time::Duration;

/// Strategy for building work items and the collector-side receive ends
pub trait Transport: Send + 'static {
    type Item: WorkItem;
    type Receiver: AckReceiver<Duration>;

    /// Name used in traces and reports
    fn name(&self) -> &'static str;

    /// Build the item for dispatch slot `index` (1-based)
    fn make_item(&mut self, index: usize, duration: Duration) -> Self::Item;

    /// Hand over the receive ends, first `collectors` of them to be read
    /// Returns at least `collectors` receivers; any beyond that are kept
    /// alive but never read.
    fn into_receivers(self, collectors: usize) -> Vec<Self::Receiver>;
}
