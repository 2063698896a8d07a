// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::Parser;
use dispatch_ack_task_channels::{run_round, Config, TransportKind};
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Dispatch one work item to each worker and wait for every acknowledgment
#[derive(Debug, Parser)]
#[command(name = "dispatch-ack", version)]
struct Cli {
    /// JSON config file; missing or invalid files fall back to defaults
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// How workers receive their acknowledgment capability
    #[arg(long, value_enum)]
    transport: Option<TransportKind>,

    #[arg(long)]
    workers: Option<usize>,

    /// Collectors to start; fewer than workers leaves the round blocked
    #[arg(long)]
    collectors: Option<usize>,

    /// Worker i works for (i + 1) time units
    #[arg(long)]
    time_unit_ms: Option<u64>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(transport) = self.transport {
            config.transport = transport;
        }
        if let Some(workers) = self.workers {
            config.num_workers = workers;
        }
        if let Some(collectors) = self.collectors {
            config.num_collectors = Some(collectors);
        }
        if let Some(time_unit_ms) = self.time_unit_ms {
            config.time_unit_ms = time_unit_ms;
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        Config::load(&cli.config).unwrap_or_else(|e| {
            warn!(path = %cli.config.display(), error = %e, "Using default configuration");
            Config::default()
        })
    } else {
        Config::default()
    };
    cli.apply(&mut config);

    info!("=== DISPATCH AND ACKNOWLEDGE ===");
    config.print_summary();

    let plan = config.plan();
    tokio::select! {
        result = run_round(config.transport, &plan) => match result {
            Ok(report) => info!(
                transport = report.transport,
                acknowledged = report.acknowledgements.len(),
                missed = report.missed_acks,
                failed = report.failed_workers,
                "Round finished in {:.2}s",
                report.elapsed.as_secs_f64()
            ),
            Err(e) => warn!(error = %e, "Round did not run"),
        },
        _ = signal::ctrl_c() => {
            warn!("Ctrl+C received, abandoning the round");
        }
    }
}
