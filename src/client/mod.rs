//! Authenticated client for the resident API.

pub mod http;
pub mod resources;

use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::auth::{AccessTokenProvider, BuildingLinkAuth, HttpSession};
use crate::config::{ClientConfig, Credentials};
use crate::error::Result;

/// Property the property-scoped endpoints (contacts) are asked about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyContext {
    pub property_id: Option<String>,
    pub legacy_id: Option<i64>,
    pub user_id: Option<String>,
}

/// Async client for the BuildingLink API.
///
/// # Example
/// ```no_run
/// use buildinglink::{BuildingLinkClient, Credentials};
///
/// # async fn example() -> buildinglink::Result<()> {
/// let client = BuildingLinkClient::new(Credentials::login("resident@example.com", "secret"))?;
/// for package in client.packages().await? {
///     println!("{} {:?}", package.carrier(), package.tracking_number());
/// }
/// # Ok(())
/// # }
/// ```
pub struct BuildingLinkClient {
    tokens: Arc<dyn AccessTokenProvider>,
    auth: Option<Arc<BuildingLinkAuth>>,
    http: reqwest::Client,
    config: ClientConfig,
    device_id: String,
    context: RwLock<PropertyContext>,
}

impl BuildingLinkClient {
    /// Client with the default endpoints.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let session = HttpSession::new(&config)?;
        let auth = Arc::new(BuildingLinkAuth::with_session(
            credentials,
            config.clone(),
            session.clone(),
        )?);
        Ok(Self {
            tokens: auth.clone(),
            auth: Some(auth),
            http: session.client().clone(),
            config,
            device_id: Uuid::new_v4().to_string(),
            context: RwLock::new(PropertyContext::default()),
        })
    }

    /// Client built from `BUILDINGLINK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env();
        let client = Self::with_config(credentials, ClientConfig::from_env())?;
        Ok(match std::env::var("BUILDINGLINK_DEVICE_ID") {
            Ok(device_id) if !device_id.trim().is_empty() => client.with_device_id(device_id),
            _ => client,
        })
    }

    /// Client that takes its tokens from `tokens` instead of managing them.
    pub fn with_token_provider(
        tokens: Arc<dyn AccessTokenProvider>,
        config: ClientConfig,
    ) -> Result<Self> {
        let session = HttpSession::new(&config)?;
        Ok(Self {
            tokens,
            auth: None,
            http: session.client().clone(),
            config,
            device_id: Uuid::new_v4().to_string(),
            context: RwLock::new(PropertyContext::default()),
        })
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = device_id.into();
        self
    }

    /// The auth manager, unless tokens come from an external provider.
    pub fn auth(&self) -> Option<&Arc<BuildingLinkAuth>> {
        self.auth.as_ref()
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Current refresh token; it may rotate after each refresh.
    pub fn refresh_token(&self) -> Option<String> {
        self.auth.as_ref().and_then(|auth| auth.refresh_token())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Set the property used by property-scoped calls.
    pub fn set_property(
        &self,
        property_id: impl Into<String>,
        legacy_id: i64,
        user_id: Option<String>,
    ) {
        let mut context = self
            .context
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *context = PropertyContext {
            property_id: Some(property_id.into()),
            legacy_id: Some(legacy_id),
            user_id,
        };
    }

    pub fn property_context(&self) -> PropertyContext {
        self.context
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl std::fmt::Debug for BuildingLinkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildingLinkClient")
            .field("device_id", &self.device_id)
            .field("context", &self.property_context())
            .field("auth", &self.auth)
            .finish()
    }
}

