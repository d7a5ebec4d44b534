use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use super::error::AuthError;
use super::login::{CredentialLogin, LoginToken};
use super::provider::AccessTokenProvider;
use super::refresh::TokenRefresher;
use super::session::HttpSession;
use super::token::Token;
use crate::config::{ClientConfig, Credentials};
use crate::models::TokenResponse;

/// Authentication state for one resident account.
///
/// Supports two ways in:
/// 1. Username/password through the web login flow.
/// 2. A refresh token exchanged at the OAuth token endpoint.
///
/// When both are available the refresh token is tried first and the login
/// flow is the fallback.
///
/// # Example
/// ```no_run
/// use buildinglink::auth::BuildingLinkAuth;
/// use buildinglink::config::{ClientConfig, Credentials};
///
/// # async fn example() -> Result<(), buildinglink::auth::AuthError> {
/// let auth = BuildingLinkAuth::new(
///     Credentials::refresh_token("refresh-token"),
///     ClientConfig::default(),
/// )?;
/// let token = auth.get_access_token().await?;
/// # Ok(())
/// # }
/// ```
pub struct BuildingLinkAuth {
    username: Option<String>,
    password: Option<String>,
    config: ClientConfig,
    session: HttpSession,
    refresher: TokenRefresher,
    state: Mutex<Token>,
    // Serializes refreshes and logins so concurrent callers share one result.
    gate: tokio::sync::Mutex<()>,
}

impl BuildingLinkAuth {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, AuthError> {
        let session = HttpSession::new(&config)?;
        Self::with_session(credentials, config, session)
    }

    /// Build on an existing session so API calls share its cookies.
    pub fn with_session(
        credentials: Credentials,
        config: ClientConfig,
        session: HttpSession,
    ) -> Result<Self, AuthError> {
        let credentials = credentials.normalized();
        if credentials.username.is_none() && credentials.refresh_token.is_none() {
            return Err(AuthError::MissingCredentials);
        }
        let state = Token {
            refresh_token: credentials.refresh_token,
            ..Token::default()
        };
        Ok(Self {
            username: credentials.username,
            password: credentials.password,
            refresher: TokenRefresher::new(&config),
            config,
            session,
            state: Mutex::new(state),
            gate: tokio::sync::Mutex::new(()),
        })
    }

    pub fn session(&self) -> &HttpSession {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the held tokens.
    pub fn token(&self) -> Token {
        self.state().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state().refresh_token.clone()
    }

    /// Whether the access token is present and outside the expiry buffer.
    pub fn is_token_valid(&self) -> bool {
        self.state().is_valid(self.config.token_expiry_buffer)
    }

    /// Exchange the refresh token for a new access token.
    pub async fn refresh(&self) -> Result<TokenResponse, AuthError> {
        let _gate = self.gate.lock().await;
        self.refresh_locked().await
    }

    /// Run the web login flow with the configured username and password.
    pub async fn login(&self) -> Result<String, AuthError> {
        let _gate = self.gate.lock().await;
        self.login_locked().await
    }

    /// A valid access token, refreshing or logging in first if necessary.
    pub async fn get_access_token(&self) -> Result<String, AuthError> {
        let _gate = self.gate.lock().await;
        self.resolve_locked().await
    }

    /// Discard the current access token and obtain a new one.
    pub async fn force_refresh(&self) -> Result<String, AuthError> {
        let _gate = self.gate.lock().await;
        self.state().invalidate();
        self.resolve_locked().await
    }

    async fn resolve_locked(&self) -> Result<String, AuthError> {
        if let Some(token) = self.valid_access_token() {
            return Ok(token);
        }

        let mut refresh_failure = None;
        if self.refresh_token().is_some() {
            match self.refresh_locked().await {
                Ok(response) => return Ok(response.access_token),
                Err(err) => {
                    debug!(error = %err, "refresh token failed, falling back to login");
                    refresh_failure = Some(err);
                }
            }
        }

        if self.username.is_some() && self.password.is_some() {
            return self.login_locked().await;
        }

        match refresh_failure {
            Some(err) => Err(AuthError::TokenExpired(err.to_string())),
            None => Err(AuthError::NoAuthMethod),
        }
    }

    async fn refresh_locked(&self) -> Result<TokenResponse, AuthError> {
        let refresh_token = self.refresh_token().ok_or(AuthError::MissingRefreshToken)?;
        let response = self
            .refresher
            .exchange(self.session.client(), &refresh_token)
            .await?;
        self.state()
            .apply_response(response.clone(), self.config.default_token_lifetime);
        debug!("access token refreshed");
        Ok(response)
    }

    async fn login_locked(&self) -> Result<String, AuthError> {
        let (Some(username), Some(password)) = (&self.username, &self.password) else {
            return Err(AuthError::MissingCredentials);
        };
        let refresh_token = self.refresh_token();
        let outcome = CredentialLogin::new(&self.session, &self.config)
            .run(username, password, refresh_token.as_deref())
            .await?;
        let mut state = self.state();
        match outcome {
            LoginToken::CallbackForm(access_token) => {
                state.set_access_token(access_token.clone(), self.config.default_token_lifetime);
                Ok(access_token)
            }
            LoginToken::Grant(response) => {
                let access_token = response.access_token.clone();
                state.apply_response(response, self.config.default_token_lifetime);
                Ok(access_token)
            }
        }
    }

    fn valid_access_token(&self) -> Option<String> {
        let state = self.state();
        if state.is_valid(self.config.token_expiry_buffer) {
            state.access_token.clone()
        } else {
            None
        }
    }

    fn state(&self) -> MutexGuard<'_, Token> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AccessTokenProvider for BuildingLinkAuth {
    async fn access_token(&self) -> Result<String, AuthError> {
        self.get_access_token().await
    }

    async fn renew_access_token(&self, rejected: &str) -> Result<String, AuthError> {
        let _gate = self.gate.lock().await;
        {
            let mut state = self.state();
            if state.access_token.as_deref() == Some(rejected) {
                state.invalidate();
            }
        }
        self.resolve_locked().await
    }
}

impl std::fmt::Debug for BuildingLinkAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildingLinkAuth")
            .field("username", &self.username)
            .field("has_password", &self.password.is_some())
            .field("token_valid", &self.is_token_valid())
            .finish()
    }
}
