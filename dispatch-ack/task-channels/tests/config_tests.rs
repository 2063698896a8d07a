// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use dispatch_ack_core::RoundPlan;
use dispatch_ack_task_channels::{Config, ConfigError, TransportKind};
use std::fs;
use std::time::Duration;

#[test]
fn test_default_config_reproduces_the_fixed_round() {
    let config = Config::default();

    assert_eq!(config.transport, TransportKind::Channel);
    assert_eq!(config.plan(), RoundPlan::default());
}

#[test]
fn test_empty_object_falls_back_to_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn test_transport_names_match_the_cli_names() {
    let closure: Config = serde_json::from_str(r#"{"transport": "chan-in-closure"}"#).unwrap();
    let record: Config = serde_json::from_str(r#"{"transport": "chan-in-struct"}"#).unwrap();

    assert_eq!(closure.transport, TransportKind::Closure);
    assert_eq!(record.transport, TransportKind::Struct);
    assert!(serde_json::from_str::<Config>(r#"{"transport": "carrier-pigeon"}"#).is_err());
}

#[test]
fn test_transport_kind_name_is_its_config_name() {
    for kind in [
        TransportKind::Channel,
        TransportKind::Closure,
        TransportKind::Struct,
    ] {
        let json = format!(r#"{{"transport": "{}"}}"#, kind.name());
        let config: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(config.transport, kind);
    }
    assert_eq!(TransportKind::Channel.name(), "chan-in-chan");
}

#[test]
fn test_plan_follows_worker_collector_and_unit_settings() {
    let config: Config = serde_json::from_str(
        r#"{"num_workers": 3, "num_collectors": 2, "time_unit_ms": 250}"#,
    )
    .unwrap();

    let plan = config.plan();
    assert_eq!(plan.workers(), 3);
    assert_eq!(plan.collectors(), 2);
    assert_eq!(
        plan.durations(),
        &[
            Duration::from_millis(500),
            Duration::from_millis(750),
            Duration::from_millis(1000),
        ]
    );
}

#[test]
fn test_load_reads_a_config_file() {
    let path =
        std::env::temp_dir().join(format!("dispatch-ack-config-{}.json", std::process::id()));
    fs::write(&path, r#"{"num_workers": 4, "transport": "chan-in-struct"}"#).unwrap();

    let config = Config::load(&path);
    fs::remove_file(&path).unwrap();

    let config = config.unwrap();
    assert_eq!(config.num_workers, 4);
    assert_eq!(config.transport, TransportKind::Struct);
}

#[test]
fn test_load_reports_missing_and_malformed_files() {
    let missing = std::env::temp_dir().join("dispatch-ack-config-does-not-exist.json");
    assert!(matches!(Config::load(&missing), Err(ConfigError::Io(_))));

    let path =
        std::env::temp_dir().join(format!("dispatch-ack-bad-{}.json", std::process::id()));
    fs::write(&path, "{ not json").unwrap();
    let result = Config::load(&path);
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
