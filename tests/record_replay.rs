//! Cassette-driven scan integration tests.
//!
//! A full scan (directory walk, breach lookups, report write) is recorded
//! by hand into cassettes, then replayed through `ServiceContext` to prove
//! the pipeline is deterministic and touches no live service. A replay can
//! itself be recorded into a session whose cassettes replay on their own.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use breachscan::cassette::config::CassetteConfig;
use breachscan::cassette::recorder::CassetteRecorder;
use breachscan::cassette::session::RecordingSession;
use breachscan::commands::scan;
use breachscan::config::{ScanConfig, Seeds};
use breachscan::context::ServiceContext;
use breachscan::error::ScanError;
use breachscan::verify::RateTier;

/// Seed G holds user U and nested group N; N holds user V.
fn directory_interactions() -> Vec<(&'static str, Value)> {
    vec![
        ("connect", json!({"ok": null})),
        ("resolve_group", json!({"ok": {"id": "G", "display_name": "All Staff"}})),
        (
            "list_group_members",
            json!({"ok": [
                {"id": "U", "member_type": "user"},
                {"id": "N", "member_type": "group"},
                {"id": "sp", "member_type": {"other": "servicePrincipal"}}
            ]}),
        ),
        (
            "resolve_user",
            json!({"ok": {"id": "U", "display_name": "Uma", "mail": "uma@corp.example",
                          "department": "Sales", "account_enabled": true}}),
        ),
        ("resolve_group", json!({"ok": {"id": "N", "display_name": "EMEA"}})),
        ("list_group_members", json!({"ok": [{"id": "V", "member_type": "user"}]})),
        (
            "resolve_user",
            json!({"ok": {"id": "V", "display_name": "Vic", "mail": "vic@corp.example"}}),
        ),
    ]
}

fn breach_interactions() -> Vec<(&'static str, Value)> {
    vec![
        (
            "check_breaches",
            json!({"ok": [{"Name": "Adobe", "BreachDate": "2013-10-04",
                           "DataClasses": ["Email addresses", "Passwords"]}]}),
        ),
        ("check_breaches", json!({"err": {"kind": "rate_limited", "message": "retry later"}})),
    ]
}

fn record_port(recorder: &mut CassetteRecorder, port: &str, interactions: Vec<(&str, Value)>) {
    for (method, output) in interactions {
        recorder.record(port, method, json!({}), output);
    }
}

fn scan_config(output: &Path) -> ScanConfig {
    ScanConfig {
        seeds: Seeds::Ids(vec!["G".into()]),
        expand_nested: true,
        rate: RateTier::Rpm10,
        skip_breach_check: false,
        api_key: Some("test-key".into()),
        output: output.to_path_buf(),
        pdf_browser: None,
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(future)
}

#[test]
fn replayed_scan_is_deterministic() {
    let dir = std::env::temp_dir().join("breachscan_record_replay_mono");
    std::fs::create_dir_all(&dir).unwrap();
    let cassette_path = dir.join("scan.cassette.yaml");

    let mut recorder = CassetteRecorder::new(&cassette_path, "scan", "0.1.0");
    record_port(&mut recorder, "directory", directory_interactions());
    record_port(&mut recorder, "breaches", breach_interactions());
    recorder.record("clock", "now", json!({}), json!("2025-03-15T14:30:00Z"));
    recorder.record("fs", "write", json!({"path": "report.html"}), json!({"ok": null}));
    recorder.finish().expect("recording should succeed");

    let config = scan_config(Path::new("report.html"));
    let mut summaries = Vec::new();
    for _ in 0..2 {
        let ctx = ServiceContext::replaying(&cassette_path).unwrap();
        let output = block_on(scan::run(&ctx, &config)).unwrap();
        summaries.push(output.summary);
    }

    let summary = &summaries[0];
    assert_eq!(summaries[0], summaries[1], "replays differ");
    assert_eq!(summary.groups_processed, 2);
    assert_eq!(summary.unique_users, 2);
    assert_eq!(summary.unique_nested_groups, 1);
    assert_eq!(summary.breached_accounts, 1);
    assert_eq!(summary.total_breaches, 1);
    assert_eq!(summary.failed_checks, 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rerecorded_session_replays_without_the_source_cassette() {
    let dir = std::env::temp_dir().join("breachscan_record_replay_session");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let source = dir.join("source.cassette.yaml");

    let mut recorder = CassetteRecorder::new(&source, "source", "0.1.0");
    record_port(&mut recorder, "directory", directory_interactions());
    record_port(&mut recorder, "breaches", breach_interactions());
    recorder.record("clock", "now", json!({}), json!("2025-03-15T14:30:00Z"));
    recorder.record("fs", "write", json!({"path": "report.html"}), json!({"ok": null}));
    recorder.finish().unwrap();

    let config = scan_config(Path::new("report.html"));
    let session = RecordingSession::in_dir(dir.join("sessions")).unwrap();
    let first = {
        let ctx = ServiceContext::replaying(&source).unwrap().recording_into(&session);
        block_on(scan::run(&ctx, &config)).unwrap()
    };
    let session_dir = session.finish().unwrap();
    std::fs::remove_file(&source).unwrap();

    let ctx = ServiceContext::replaying_from(&CassetteConfig::from_dir(&session_dir)).unwrap();
    let second = block_on(scan::run(&ctx, &config)).unwrap();
    assert_eq!(first.summary, second.summary);
    assert_eq!(second.summary.failed_checks, 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn per_port_cassettes_drive_a_membership_only_scan() {
    let dir = std::env::temp_dir().join("breachscan_record_replay_ports");
    std::fs::create_dir_all(&dir).unwrap();

    let mut directory = CassetteRecorder::new(dir.join("directory.cassette.yaml"), "dir", "0.1.0");
    record_port(&mut directory, "directory", directory_interactions());
    directory.finish().unwrap();

    let mut clock = CassetteRecorder::new(dir.join("clock.cassette.yaml"), "clock", "0.1.0");
    clock.record("clock", "now", json!({}), json!("2025-06-01T09:00:00Z"));
    clock.finish().unwrap();

    let mut fs = CassetteRecorder::new(dir.join("fs.cassette.yaml"), "fs", "0.1.0");
    fs.record("fs", "write", json!({}), json!({"ok": null}));
    fs.finish().unwrap();

    // No breaches cassette: any lookup would panic.
    let config = CassetteConfig::from_dir(&dir);
    assert!(config.breaches.is_none());
    let ctx = ServiceContext::replaying_from(&config).unwrap();

    let scan = ScanConfig {
        skip_breach_check: true,
        api_key: None,
        ..scan_config(&PathBuf::from("report.html"))
    };
    let output = block_on(scan::run(&ctx, &scan)).unwrap();
    assert!(!output.summary.verified);
    assert_eq!(output.summary.users_with_email, 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failed_connect_aborts_before_traversal() {
    let dir = std::env::temp_dir().join("breachscan_record_replay_connect");
    std::fs::create_dir_all(&dir).unwrap();
    let cassette_path = dir.join("connect.cassette.yaml");

    let mut recorder = CassetteRecorder::new(&cassette_path, "connect", "0.1.0");
    recorder.record(
        "directory",
        "connect",
        json!({}),
        json!({"err": {"kind": "auth", "message": "token expired"}}),
    );
    recorder.finish().unwrap();

    let ctx = ServiceContext::replaying(&cassette_path).unwrap();
    let err = block_on(scan::run(&ctx, &scan_config(Path::new("report.html")))).unwrap_err();
    assert!(matches!(err, ScanError::Connect(_)));
    assert!(err.to_string().contains("token expired"));

    let _ = std::fs::remove_dir_all(&dir);
}
