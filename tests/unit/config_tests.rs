use std::path::PathBuf;
use std::time::Duration;

use portq::config::Config;
use portq::test_utils::{TestCase, run_table_tests};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn config_defaults_from_empty_fixture() -> Result<(), String> {
    let cases = vec![TestCase {
        name: "default",
        input: "tests/fixtures/configs/default.toml",
        expected: (100usize, Duration::from_millis(300), 128usize, 30u64, "human".to_string()),
    }];

    run_table_tests(cases, |relative| {
        let config = Config::load(Some(fixture_path(relative).as_path())).expect("load config");
        (
            config.search.max_results,
            config.search.debounce,
            config.search.cache_size,
            config.index.timeout_secs,
            config.output.format,
        )
    })
}

#[test]
fn config_custom_fixture_overrides_everything() -> Result<(), String> {
    let cases = vec![TestCase {
        name: "custom",
        input: "tests/fixtures/configs/custom.toml",
        expected: (
            Some("https://ports.example".to_string()),
            10u64,
            200usize,
            Duration::from_millis(150),
            64usize,
            "plain".to_string(),
            true,
            false,
        ),
    }];

    run_table_tests(cases, |relative| {
        let config = Config::load(Some(fixture_path(relative).as_path())).expect("load config");
        (
            config.index.base_url.clone(),
            config.index.timeout_secs,
            config.search.max_results,
            config.search.debounce,
            config.search.cache_size,
            config.output.format.clone(),
            config.search.free_text.depends,
            config.search.free_text.category,
        )
    })
}

#[test]
fn config_custom_fixture_resolves_index_url() {
    let config = Config::load(Some(fixture_path("tests/fixtures/configs/custom.toml").as_path()))
        .expect("load config");
    assert_eq!(
        config.index.resolve_url().expect("resolve url"),
        "https://ports.example/ports.json"
    );
}

#[test]
fn config_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("does-not-exist.toml");
    let config = Config::load(Some(path.as_path())).expect("load config");
    assert_eq!(config.search.max_results, 100);
}

#[test]
fn config_malformed_file_is_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[search\nmax_results = ").expect("write fixture");

    let err = Config::load(Some(path.as_path())).expect_err("malformed config must fail");
    assert!(matches!(err, portq::PqError::Config(_)));
}
