//! Integration tests for scenebatch
//!
//! These tests verify end-to-end functionality.
//! Some tests require a host application bridge to run.

use std::path::PathBuf;

use clap::Parser;
use scenebatch::adapter::config::{Config, HostConfig};
use scenebatch::driver::{Args, SceneBatchWorkflow};
use tempfile::TempDir;

/// Get the path to test fixtures
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_fixture_config_exists() {
    let config = fixtures_path().join("config.json");
    assert!(config.exists(), "config.json fixture should exist");
}

#[test]
fn test_fixture_config_loads() {
    let path = fixtures_path().join("config.json");
    let config = Config::load(path.to_str().unwrap()).expect("Failed to load config.json");

    assert_eq!(config.extensions, vec!["ma", "mb"]);
    assert_eq!(config.cleanup_nodes.len(), 2);
    assert_eq!(config.host.command, "mayapy");
    assert_eq!(config.render.raster_ext, "jpg");

    let repair = config
        .reference_repair
        .as_ref()
        .expect("fixture should configure reference repair");
    assert_eq!(repair.search_token, "Female_Rig_v03.mb");

    let processing = config.processing_config();
    assert_eq!(processing.file_timeout.map(|d| d.as_secs()), Some(900));
    assert_eq!(processing.open_retry.max_retries, 3);
    assert!(!config.output_root().to_string_lossy().starts_with('~'));
}

/// Integration test that requires a host application bridge
/// Run with: cargo test --test integration_test -- --ignored
#[tokio::test]
#[ignore]
async fn test_bridge_export_e2e() {
    // This test requires:
    // - SCENEBATCH_TEST_BRIDGE: command that starts the host bridge
    // - SCENEBATCH_TEST_SCENES: directory containing rigged scene files

    let bridge = std::env::var("SCENEBATCH_TEST_BRIDGE")
        .expect("SCENEBATCH_TEST_BRIDGE env var required for E2E test");
    let scenes = std::env::var("SCENEBATCH_TEST_SCENES")
        .expect("SCENEBATCH_TEST_SCENES env var required for E2E test");

    println!("E2E test configuration:");
    println!("  Bridge: {}", bridge);
    println!("  Scenes: {}", scenes);

    let output = TempDir::new().unwrap();
    let config = Config {
        scene_dir: scenes,
        output_dir: output.path().to_string_lossy().to_string(),
        host: HostConfig {
            command: bridge,
            args: vec![],
        },
        ..Config::default()
    };

    let workflow = SceneBatchWorkflow::new(config);
    workflow
        .execute(Args::parse_from(["scenebatch", "export"]))
        .await
        .expect("export batch should complete");

    let exported = std::fs::read_dir(output.path()).unwrap().count();
    assert!(exported > 0, "at least one FBX should be exported");
}
