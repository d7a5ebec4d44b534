//! Client configuration (layered: code > env > config file).

pub mod credentials;
pub mod file;

pub use credentials::Credentials;
pub use file::ConfigFile;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const DEFAULT_TOKEN_URL: &str = "https://auth.buildinglink.com/connect/token";
pub const DEFAULT_LOGIN_URL: &str = "https://www.buildinglink.com/V2/Global/Login/Login.aspx";
pub const DEFAULT_OIDC_CALLBACK_URL: &str = "https://www.buildinglink.com/signin-oidc";
pub const DEFAULT_AUTH_REDIRECT_PREFIX: &str = "https://auth";

pub const DEFAULT_CLIENT_ID: &str = "ios-resident-app";
pub const DEFAULT_USER_AGENT: &str =
    "ResidentApp/3.9.31 (com.buildinglink.BuildingLink; build:796; iOS 26.3) Alamofire/5.10.2";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 30;
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 900;

/// Upstream services the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ServiceHost {
    Api,
    EventLog,
    Maintenance,
    Users,
    FrontDesk,
    Legacy,
}

/// Base URLs and auth endpoints.
///
/// Every field can be overridden, which is how tests point the client at a
/// local mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub token_url: String,
    pub login_url: String,
    pub oidc_callback_url: String,
    /// Marker that starts the auth redirect URL embedded in the login page.
    pub auth_redirect_prefix: String,
    pub api: String,
    pub event_log: String,
    pub maintenance: String,
    pub users: String,
    pub front_desk: String,
    pub legacy: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            oidc_callback_url: DEFAULT_OIDC_CALLBACK_URL.to_string(),
            auth_redirect_prefix: DEFAULT_AUTH_REDIRECT_PREFIX.to_string(),
            api: "https://api.buildinglink.com".to_string(),
            event_log: "https://eventlog-us1.buildinglink.com".to_string(),
            maintenance: "https://maintenance-us1.buildinglink.com".to_string(),
            users: "https://users-us1.buildinglink.com".to_string(),
            front_desk: "https://frontdeskinstructions-us1.buildinglink.com".to_string(),
            legacy: "https://www.buildinglink.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Route every service and auth endpoint through one base URL.
    pub fn all_at(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{base}/connect/token"),
            login_url: format!("{base}/login"),
            oidc_callback_url: format!("{base}/signin-oidc"),
            auth_redirect_prefix: base.to_string(),
            api: base.to_string(),
            event_log: base.to_string(),
            maintenance: base.to_string(),
            users: base.to_string(),
            front_desk: base.to_string(),
            legacy: base.to_string(),
        }
    }

    pub fn host(&self, host: ServiceHost) -> &str {
        let url = match host {
            ServiceHost::Api => &self.api,
            ServiceHost::EventLog => &self.event_log,
            ServiceHost::Maintenance => &self.maintenance,
            ServiceHost::Users => &self.users,
            ServiceHost::FrontDesk => &self.front_desk,
            ServiceHost::Legacy => &self.legacy,
        };
        url.trim_end_matches('/')
    }

    pub fn set_host(&mut self, host: ServiceHost, url: impl Into<String>) {
        let slot = match host {
            ServiceHost::Api => &mut self.api,
            ServiceHost::EventLog => &mut self.event_log,
            ServiceHost::Maintenance => &mut self.maintenance,
            ServiceHost::Users => &mut self.users,
            ServiceHost::FrontDesk => &mut self.front_desk,
            ServiceHost::Legacy => &mut self.legacy,
        };
        *slot = url.into();
    }

    /// Full URL for `path` on `host`.
    pub fn url(&self, host: ServiceHost, path: &str) -> String {
        format!("{}{}", self.host(host), path)
    }
}

/// Settings shared by the auth flows and the request layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    pub client_id: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Tokens this close to expiry are treated as expired.
    pub token_expiry_buffer: Duration,
    /// Lifetime assumed when the server does not report one.
    pub default_token_lifetime: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_expiry_buffer: Duration::from_secs(DEFAULT_EXPIRY_BUFFER_SECS),
            default_token_lifetime: Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `BUILDINGLINK_*` environment variables.
    ///
    /// Loads `.env` when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(secs) = lookup("BUILDINGLINK_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = lookup("BUILDINGLINK_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = agent;
        }
        if let Some(base) = lookup("BUILDINGLINK_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.endpoints = Endpoints::all_at(&base);
        }
        config
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_host(mut self, host: ServiceHost, url: impl Into<String>) -> Self {
        self.endpoints.set_host(host, url);
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.token_url = url.into();
        self
    }

    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.login_url = url.into();
        self
    }

    pub fn with_oidc_callback_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.oidc_callback_url = url.into();
        self
    }

    pub fn with_auth_redirect_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.endpoints.auth_redirect_prefix = prefix.into();
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_token_expiry_buffer(mut self, buffer: Duration) -> Self {
        self.token_expiry_buffer = buffer;
        self
    }

    pub fn with_default_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.default_token_lifetime = lifetime;
        self
    }
}
