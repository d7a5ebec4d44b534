//! Tests for configuration loading.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use buildinglink::config::{ClientConfig, ConfigFile, Credentials, ServiceHost};
use buildinglink::error::BuildingLinkError;
use buildinglink::BuildingLinkClient;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 7] = [
    "BUILDINGLINK_USERNAME",
    "BUILDINGLINK_PASSWORD",
    "BUILDINGLINK_REFRESH_TOKEN",
    "BUILDINGLINK_DEVICE_ID",
    "BUILDINGLINK_TIMEOUT_SECS",
    "BUILDINGLINK_BASE_URL",
    "BUILDINGLINK_USER_AGENT",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clean_env() -> EnvGuard {
    let guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
    guard
}

#[test]
fn credentials_from_env_ignore_blank_values() {
    let _env_lock = env_lock_guard();
    let _env_guard = clean_env();

    std::env::set_var("BUILDINGLINK_USERNAME", "resident");
    std::env::set_var("BUILDINGLINK_PASSWORD", "  ");
    std::env::set_var("BUILDINGLINK_REFRESH_TOKEN", "rt-env");

    let credentials = Credentials::from_env();

    assert_eq!(credentials.username.as_deref(), Some("resident"));
    assert_eq!(credentials.password, None);
    assert!(!credentials.has_login());
    assert!(credentials.has_refresh_token());
}

#[test]
fn client_config_from_env_applies_overrides() {
    let _env_lock = env_lock_guard();
    let _env_guard = clean_env();

    std::env::set_var("BUILDINGLINK_TIMEOUT_SECS", "7");
    std::env::set_var("BUILDINGLINK_USER_AGENT", "tests/1.0");
    std::env::set_var("BUILDINGLINK_BASE_URL", "http://127.0.0.1:9999");

    let config = ClientConfig::from_env();

    assert_eq!(config.request_timeout, Duration::from_secs(7));
    assert_eq!(config.user_agent, "tests/1.0");
    assert_eq!(config.endpoints.login_url, "http://127.0.0.1:9999/login");
    assert_eq!(
        config.endpoints.host(ServiceHost::FrontDesk),
        "http://127.0.0.1:9999"
    );
}

#[test]
fn client_from_env_uses_device_id() {
    let _env_lock = env_lock_guard();
    let _env_guard = clean_env();

    std::env::set_var("BUILDINGLINK_REFRESH_TOKEN", "rt-env");
    std::env::set_var("BUILDINGLINK_DEVICE_ID", "device-env");

    let client = BuildingLinkClient::from_env().expect("client from env");

    assert_eq!(client.device_id(), "device-env");
    assert_eq!(client.refresh_token().as_deref(), Some("rt-env"));
}

#[test]
fn client_without_credentials_is_rejected() {
    let _env_lock = env_lock_guard();
    let _env_guard = clean_env();

    let err = BuildingLinkClient::from_env().unwrap_err();
    match err {
        BuildingLinkError::Authentication(message) => {
            assert!(message.to_string().contains("must be provided"))
        }
        other => panic!("expected authentication error, got {other:?}"),
    }
}

#[test]
fn generated_device_ids_differ_per_client() {
    let a = BuildingLinkClient::new(Credentials::refresh_token("rt")).unwrap();
    let b = BuildingLinkClient::new(Credentials::refresh_token("rt")).unwrap();
    assert_ne!(a.device_id(), b.device_id());
    assert!(uuid::Uuid::parse_str(a.device_id()).is_ok());
}

#[test]
fn config_file_drives_client_config() {
    let file = ConfigFile::parse(
        r#"
        client_id = "android-resident-app"
        user_agent = "tests/2.0"

        [credentials]
        username = "resident"
        password = "pw"

        [endpoints]
        api = "http://api.local"
        "#,
    )
    .unwrap();

    let config = file.client_config();
    assert_eq!(config.client_id, "android-resident-app");
    assert_eq!(config.user_agent, "tests/2.0");
    assert_eq!(config.endpoints.host(ServiceHost::Api), "http://api.local");
    assert_eq!(
        config.endpoints.host(ServiceHost::Legacy),
        "https://www.buildinglink.com"
    );
    assert!(file.credentials().has_login());
}
