//! Tests for configuration loading

use crate::common::TestWorkspace;
use minutes_digest::config::Config;
use minutes_digest::paths;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_defaults_track_go_minutes_issue() {
    let config = Config::default();
    assert_eq!(config.source.owner, "golang");
    assert_eq!(config.source.repo, "go");
    assert_eq!(config.source.issue, 33502);
    assert_eq!(config.source.per_page, 100);
    assert_eq!(config.output.state_file, PathBuf::from("data/state.json"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let ws = TestWorkspace::new();
    let config = Config::load(&ws.path().join("minutes-digest.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let config = Config::from_toml("[source]\nissue = 12345\n\n[output]\ncontent_dir = \"site/p\"\n")
        .unwrap();
    assert_eq!(config.source.issue, 12345);
    assert_eq!(config.source.owner, "golang");
    assert_eq!(config.output.content_dir, PathBuf::from("site/p"));
    assert_eq!(config.output.digest_file, PathBuf::from("data/changes.json"));
}

#[test]
fn test_invalid_values_rejected() {
    assert!(Config::from_toml("[source]\nissue = 0\n").is_err());
    assert!(Config::from_toml("[source]\nper_page = 500\n").is_err());
    assert!(Config::from_toml("[source]\nbaseline_lookback_days = 0\n").is_err());
}

#[test]
fn test_unparseable_file_names_the_path() {
    let ws = TestWorkspace::new();
    let path = ws.path().join("minutes-digest.toml");
    fs::write(&path, "[source\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("minutes-digest.toml"));
}

#[test]
fn test_toml_output_round_trips() {
    let mut config = Config::default();
    config.source.issue = 999;
    let text = config.to_toml().unwrap();
    assert_eq!(Config::from_toml(&text).unwrap(), config);
}

#[test]
#[serial]
fn test_token_read_from_configured_variable() {
    let mut config = Config::default();
    config.source.token_env = "MINUTES_DIGEST_TEST_TOKEN".to_string();

    // SAFETY: serialized with the other env-mutating tests
    unsafe { std::env::set_var("MINUTES_DIGEST_TEST_TOKEN", "  ") };
    assert_eq!(config.source.token(), None);

    unsafe { std::env::set_var("MINUTES_DIGEST_TEST_TOKEN", "ghp_test") };
    assert_eq!(config.source.token().as_deref(), Some("ghp_test"));

    unsafe { std::env::remove_var("MINUTES_DIGEST_TEST_TOKEN") };
    assert_eq!(config.source.token(), None);
}

#[test]
#[serial]
fn test_default_config_file_is_relative_to_cwd() {
    let ws = TestWorkspace::new();
    fs::write(ws.path().join("minutes-digest.toml"), "[source]\nissue = 4242\n").unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(ws.path()).unwrap();
    let config = Config::load(&paths::config_file());
    std::env::set_current_dir(original).unwrap();

    assert_eq!(config.unwrap().source.issue, 4242);
}
