use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use mule::config::Config;
use mule::domain::{Quota, Rarity};
use mule::error::{ConfigError, Error};

/// Serializes tests that touch the webhook env override.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn write_config(toml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(toml.as_bytes()).expect("write temp config");
    file
}

const FULL_CONFIG: &str = r#"
[bridge]
url = "http://127.0.0.1:7777"

[catalog]
path = "catalog.json"

[logging]
level = "info"
format = "pretty"

[trade]
target = "MainAccount"
retry_delay_secs = 2.5
skip_favorited = true

[trade.quotas]
common = "2"
mythic = "ALL"
rare = "oops"

[curation]
enabled = true
threshold = "secret"
period_secs = 15
mark_delay_ms = 500
"#;

#[test]
fn full_config_loads() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::remove_var("MULE_WEBHOOK_URL");

    let file = write_config(FULL_CONFIG);
    let config = Config::load(file.path()).expect("load config");

    assert_eq!(config.bridge.url, "http://127.0.0.1:7777");
    assert_eq!(config.trade.target.as_deref(), Some("MainAccount"));
    assert!(config.trade.skip_favorited);
    assert!(config.webhook.url.is_none());

    let options = config.trade.options();
    assert_eq!(options.retry_delay, Duration::from_millis(2500));

    let quotas = config.trade.quota_table();
    assert_eq!(quotas.get(Rarity::Common), Quota::Capped(2));
    assert_eq!(quotas.get(Rarity::Mythic), Quota::Unlimited);
    assert_eq!(quotas.get(Rarity::Rare), Quota::Excluded);
    assert_eq!(quotas.get(Rarity::Secret), Quota::Excluded);

    assert!(config.curation.enabled);
    assert_eq!(config.curation.threshold(), Rarity::Secret);
    assert_eq!(config.curation.timing().period, Duration::from_secs(15));
    assert_eq!(
        config.curation.timing().mark_delay,
        Duration::from_millis(500)
    );
}

#[test]
fn webhook_url_comes_from_environment() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("MULE_WEBHOOK_URL", "https://example.com/hook");

    let file = write_config(FULL_CONFIG);
    let config = Config::load(file.path()).expect("load config");
    assert_eq!(
        config.webhook.url.as_deref(),
        Some("https://example.com/hook")
    );

    std::env::remove_var("MULE_WEBHOOK_URL");
}

#[test]
fn invalid_webhook_url_is_rejected() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("MULE_WEBHOOK_URL", "not a url");

    let file = write_config(FULL_CONFIG);
    let err = Config::load(file.path()).expect_err("invalid webhook url");
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "webhook.url",
            ..
        })
    ));

    std::env::remove_var("MULE_WEBHOOK_URL");
}

#[test]
fn minimal_config_uses_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::remove_var("MULE_WEBHOOK_URL");

    let file = write_config(
        r#"
[bridge]
url = "http://127.0.0.1:7777"

[catalog]
path = "catalog.json"

[logging]
level = "info"
format = "pretty"
"#,
    );
    let config = Config::load(file.path()).expect("load config");

    assert!(config.trade.target.is_none());
    assert!(!config.curation.enabled);
    assert_eq!(config.curation.threshold(), Rarity::Mythic);
    assert!(config.trade.quota_table().is_empty());
}

#[test]
fn missing_bridge_url_is_rejected() {
    let _guard = ENV_LOCK.lock().unwrap();
    let file = write_config(
        r#"
[bridge]
url = ""

[catalog]
path = "catalog.json"

[logging]
level = "info"
format = "pretty"
"#,
    );
    let err = Config::load(file.path()).expect_err("empty bridge url");
    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingField {
            field: "bridge.url"
        })
    ));
}

#[test]
fn unrecognized_threshold_is_rejected() {
    let _guard = ENV_LOCK.lock().unwrap();
    let file = write_config(
        r#"
[bridge]
url = "http://127.0.0.1:7777"

[catalog]
path = "catalog.json"

[logging]
level = "info"
format = "pretty"

[curation]
threshold = "shiny"
"#,
    );
    let err = Config::load(file.path()).expect_err("bad threshold");
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "curation.threshold",
            ..
        })
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    let err = Config::load("/nonexistent/mule.toml").expect_err("missing file");
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}
