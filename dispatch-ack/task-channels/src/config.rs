// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::ValueEnum;
use dispatch_ack_core::RoundPlan;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the acknowledgment capability travels to a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
pub enum TransportKind {
    /// Bare handle to one shared ack channel
    #[default]
    #[serde(rename = "chan-in-chan")]
    #[value(name = "chan-in-chan")]
    Channel,
    /// Closure over a private ack channel per worker
    #[serde(rename = "chan-in-closure")]
    #[value(name = "chan-in-closure")]
    Closure,
    /// Record carrying id, duration and its own ack channel
    #[serde(rename = "chan-in-struct")]
    #[value(name = "chan-in-struct")]
    Struct,
}

impl TransportKind {
    /// Name used on the command line, in config files and in round reports
    pub fn name(self) -> &'static str {
        match self {
            TransportKind::Channel => "chan-in-chan",
            TransportKind::Closure => "chan-in-closure",
            TransportKind::Struct => "chan-in-struct",
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_num_workers")]
    pub num_workers: usize,
    /// Collectors to start; defaults to one per worker
    #[serde(default)]
    pub num_collectors: Option<usize>,
    /// Worker `i` works for `(i + 1) * time_unit_ms` milliseconds
    #[serde(default = "default_time_unit_ms")]
    pub time_unit_ms: u64,
    #[serde(default)]
    pub transport: TransportKind,
}

fn default_num_workers() -> usize {
    RoundPlan::DEFAULT_WORKERS
}

fn default_time_unit_ms() -> u64 {
    1000
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn plan(&self) -> RoundPlan {
        let unit = Duration::from_millis(self.time_unit_ms);
        let plan = RoundPlan::standard(self.num_workers, unit);
        match self.num_collectors {
            Some(collectors) => plan.with_collectors(collectors),
            None => plan,
        }
    }

    pub fn print_summary(&self) {
        info!("Configuration:");
        info!("  - Transport: {}", self.transport.name());
        info!("  - Workers: {}", self.num_workers);
        info!(
            "  - Collectors: {}",
            self.num_collectors.unwrap_or(self.num_workers)
        );
        info!("  - Time unit: {}ms", self.time_unit_ms);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_workers: default_num_workers(),
            num_collectors: None,
            time_unit_ms: default_time_unit_ms(),
            transport: TransportKind::default(),
        }
    }
}
