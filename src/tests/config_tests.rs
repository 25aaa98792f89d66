// src/tests/config_tests.rs

//! tests for `config.rs` functions

use std::path::Path;

use crate::cfg::config::{
    load_config,
    Settings,
    ENV_TELEGRAM_BOT_TOKEN,
    ENV_TELEGRAM_CHAT_ID,
};
use crate::common::AppError;
use crate::logging::rotation::RotationPolicy;
use crate::tests::common::{tempdir, write_file};

const DEFAULT_YAML: &str = "\
app:
  name: testapp
  version: \"1.2.3\"
  debug: false

logging:
  level: INFO
  rotation: \"00:00\"
  retention: \"10 days\"

telegram:
  enabled: false

api:
  host: \"127.0.0.1\"
  port: 8000
";

fn write_default(dir: &Path) {
    write_file(dir, "default.yaml", DEFAULT_YAML);
}

#[test]
fn test_load_default_only() {
    let tmp = tempdir().unwrap();
    write_default(tmp.path());
    let settings = load_config("dev", tmp.path()).unwrap();

    assert_eq!(settings.app.name, "testapp");
    assert_eq!(settings.app.version, "1.2.3");
    assert!(!settings.app.debug);
    assert_eq!(settings.logging.level, "INFO");
    // sections absent from the file fall back to defaults
    assert_eq!(settings.http.timeout_secs, 30);
    assert_eq!(settings.http.connect_timeout_secs, 5);
}

#[test]
fn test_load_missing_default_errors() {
    let tmp = tempdir().unwrap();
    let result = load_config("dev", tmp.path());
    match result {
        Err(AppError::Configuration(msg)) => {
            assert!(msg.contains("default config not found"), "{}", msg);
        }
        other => panic!("expected Configuration error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_env_overlay_shallow_merge() {
    let tmp = tempdir().unwrap();
    write_default(tmp.path());
    write_file(
        tmp.path(),
        "prod.yaml",
        "\
logging:
  level: WARN

api:
  host: \"0.0.0.0\"
",
    );
    let settings = load_config("prod", tmp.path()).unwrap();

    // overlay replaces keys inside matched sections
    assert_eq!(settings.logging.level, "WARN");
    assert_eq!(settings.api.host, "0.0.0.0");
    // sibling keys of merged sections survive
    assert_eq!(settings.logging.retention, "10 days");
    assert_eq!(settings.api.port, 8000);
    // untouched sections survive
    assert_eq!(settings.app.name, "testapp");
}

#[test]
fn test_unknown_env_overlay_ignored() {
    let tmp = tempdir().unwrap();
    write_default(tmp.path());
    let settings = load_config("staging", tmp.path()).unwrap();

    assert_eq!(settings.app.name, "testapp");
}

#[test]
fn test_empty_default_yaml_yields_defaults() {
    let tmp = tempdir().unwrap();
    write_file(tmp.path(), "default.yaml", "");
    let settings = load_config("dev", tmp.path()).unwrap();

    assert_eq!(settings.app.name, "rapt");
    assert_eq!(settings.logging.retention_days, 10);
}

#[test]
fn test_invalid_yaml_errors() {
    let tmp = tempdir().unwrap();
    write_file(tmp.path(), "default.yaml", "app: [unclosed");
    let result = load_config("dev", tmp.path());
    assert!(matches!(result, Err(AppError::Configuration(_))));
}

#[test]
fn test_resolve_parses_policies() {
    let tmp = tempdir().unwrap();
    write_default(tmp.path());
    write_file(
        tmp.path(),
        "sized.yaml",
        "\
logging:
  rotation: \"1 MB\"
  retention: \"2 weeks\"
",
    );
    let settings = load_config("sized", tmp.path()).unwrap();

    assert_eq!(settings.logging.rotation_policy, RotationPolicy::Size(1048576));
    assert_eq!(settings.logging.retention_days, 14);
}

#[test]
fn test_resolve_permissive_fallbacks() {
    let mut settings = Settings::default();
    settings.logging.rotation = String::from("whenever");
    settings.logging.retention = String::from("forever");
    settings.resolve();

    assert_eq!(settings.logging.rotation_policy, RotationPolicy::default());
    assert_eq!(settings.logging.retention_days, 10);
}

#[test]
fn test_telegram_env_overrides() {
    let tmp = tempdir().unwrap();
    write_default(tmp.path());
    std::env::set_var(ENV_TELEGRAM_BOT_TOKEN, "token-from-env");
    std::env::set_var(ENV_TELEGRAM_CHAT_ID, "chat-from-env");
    let settings = load_config("dev", tmp.path());
    std::env::remove_var(ENV_TELEGRAM_BOT_TOKEN);
    std::env::remove_var(ENV_TELEGRAM_CHAT_ID);
    let settings = settings.unwrap();

    assert_eq!(settings.telegram.bot_token, "token-from-env");
    assert_eq!(settings.telegram.chat_id, "chat-from-env");
}
