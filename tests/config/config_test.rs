//! Coverage for config parsing and runtime path layout.

use std::path::PathBuf;
use std::time::Duration;

use proposal_generator::config::{load_config, parse_config, Config, RuntimePaths, DEFAULT_DRAFTING_MODEL};
use proposal_generator::drafting::{DraftingConfig, FailurePolicy};

#[test]
fn partial_config_keeps_other_defaults() {
    let config = parse_config(
        r#"
[branding]
company_name = "Northwind Media"
"#,
    )
    .expect("partial config parses");
    assert_eq!(config.branding.company_name, "Northwind Media");
    assert_eq!(config.drafting.model, DEFAULT_DRAFTING_MODEL);
    assert_eq!(config.drafting.on_failure, FailurePolicy::Fallback);
    assert!(config.projects.root.is_none());
}

#[test]
fn abort_policy_flows_into_drafting_config() {
    let config = parse_config(
        r#"
[drafting]
timeout_secs = 5
on_failure = "abort"
"#,
    )
    .expect("drafting config parses");
    let drafting = DraftingConfig::from(&config.drafting);
    assert_eq!(drafting.timeout, Duration::from_secs(5));
    assert_eq!(drafting.on_failure, FailurePolicy::Abort);
    assert_eq!(drafting.max_tokens, None);
}

#[test]
fn invalid_toml_is_an_error() {
    assert!(parse_config("[drafting\nmodel = ").is_err());
    assert!(parse_config("[drafting]\ntimeout_secs = \"soon\"\n").is_err());
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = load_config(&dir.path().join("config.toml")).expect("defaults");
    assert_eq!(config, Config::default());
}

#[test]
fn config_file_is_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[projects]\nroot = \"/srv/proposals\"\n").expect("write config");
    let config = load_config(&path).expect("config loads");
    assert_eq!(config.projects.root, Some(PathBuf::from("/srv/proposals")));

    std::fs::write(&path, "[projects]\nroot = 7\n").expect("write config");
    let err = load_config(&path).expect_err("bad type");
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn runtime_paths_layout() {
    let paths = RuntimePaths::under(PathBuf::from("/home/jane/.proposal-generator"));
    assert_eq!(
        paths.config_toml,
        PathBuf::from("/home/jane/.proposal-generator/config.toml")
    );
    assert_eq!(paths.env_file, PathBuf::from("/home/jane/.proposal-generator/.env"));
    assert_eq!(paths.logs_dir, PathBuf::from("/home/jane/.proposal-generator/logs"));
}
