//! TOML configuration file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ClientConfig, Credentials, Endpoints};
use crate::error::{BuildingLinkError, Result};

/// On-disk client settings.
///
/// ```toml
/// device_id = "4f0c6a51-0a7e-4bd2-9b1e-1d1f0f5b8c11"
/// timeout_secs = 20
///
/// [credentials]
/// username = "resident@example.com"
/// password = "..."
///
/// [endpoints]
/// event_log = "https://eventlog-eu1.buildinglink.com"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub credentials: Credentials,
    pub device_id: Option<String>,
    pub client_id: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub endpoints: Endpoints,
}

impl ConfigFile {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(BuildingLinkError::Io(err)),
        };
        Self::parse(&raw).map_err(|err| match err {
            BuildingLinkError::Configuration(msg) => {
                BuildingLinkError::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| BuildingLinkError::Configuration(err.to_string()))
    }

    /// Client settings described by this file.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default().with_endpoints(self.endpoints.clone());
        if let Some(client_id) = &self.client_id {
            config.client_id = client_id.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }

    pub fn credentials(&self) -> Credentials {
        self.credentials.clone().normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceHost;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn partial_endpoints_keep_defaults() {
        let file = ConfigFile::parse(
            r#"
            device_id = "device-1"
            timeout_secs = 12

            [credentials]
            refresh_token = "rt-1"

            [endpoints]
            event_log = "https://eventlog-eu1.buildinglink.com"
            "#,
        )
        .unwrap();
        let config = file.client_config();
        assert_eq!(config.request_timeout, Duration::from_secs(12));
        assert_eq!(
            config.endpoints.host(ServiceHost::EventLog),
            "https://eventlog-eu1.buildinglink.com"
        );
        assert_eq!(config.endpoints.api, "https://api.buildinglink.com");
        assert_eq!(file.device_id.as_deref(), Some("device-1"));
        assert_eq!(file.credentials().refresh_token.as_deref(), Some("rt-1"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ConfigFile::parse("refresh = 1").unwrap_err();
        assert!(matches!(err, BuildingLinkError::Configuration(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("buildinglink.toml");
        fs::write(&path, "[credentials]\nusername = \"resident\"\npassword = \"pw\"\n").unwrap();
        let file = ConfigFile::load(&path).unwrap();
        assert!(file.credentials().has_login());
    }
}
