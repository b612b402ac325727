//! Configuration loading tests

use std::io::Write;

use shortlife::config::{StaticConfig, get_config, init_config_from, set_config};

fn write_toml(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_toml(
        r#"
[link]
code_length = 8
base_url = "https://s.example"

[app]
cleanup_interval_seconds = 5
"#,
    );

    let config = StaticConfig::load_from(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.link.code_length, 8);
    assert_eq!(config.link.base_url, "https://s.example");
    assert_eq!(config.link.default_max_clicks, 100);
    assert_eq!(config.link.default_ttl_seconds, 86400);
    assert_eq!(config.link.max_short_gen_attempts, 10);
    assert_eq!(config.app.cleanup_interval_seconds, 5);
    assert_eq!(config.server.port, 8080);
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(StaticConfig::load_from("/nonexistent/shortlife.toml").is_err());
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = StaticConfig::default();
    config.link.default_max_clicks = 7;
    config.save_to_file(&path).unwrap();

    let loaded = StaticConfig::load_from(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded.link.default_max_clicks, 7);
}

#[test]
fn test_global_config_init_and_replace() {
    let file = write_toml("[link]\ndefault_ttl_seconds = 42\n");
    init_config_from(file.path().to_str().unwrap()).unwrap();
    assert_eq!(get_config().link.default_ttl_seconds, 42);

    let invalid = write_toml("[link]\ncode_length = 0\n");
    assert!(init_config_from(invalid.path().to_str().unwrap()).is_err());
    assert_eq!(get_config().link.default_ttl_seconds, 42);

    set_config(StaticConfig::default());
    assert_eq!(get_config().link.default_ttl_seconds, 86400);
}
