use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;

use super::error::AuthError;
use crate::config::ClientConfig;
use crate::models::TokenResponse;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Exchanges a refresh token at the OAuth token endpoint.
#[derive(Debug, Clone)]
pub struct TokenRefresher {
    token_url: String,
    client_id: String,
    user_agent: String,
}

impl TokenRefresher {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            token_url: config.endpoints.token_url.clone(),
            client_id: config.client_id.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// POST a `refresh_token` grant.
    ///
    /// Anything other than 200 is reported as [`AuthError::RefreshRejected`]
    /// with the response body.
    pub async fn exchange(
        &self,
        client: &reqwest::Client,
        refresh_token: &str,
    ) -> Result<TokenResponse, AuthError> {
        let resp = client
            .post(&self.token_url)
            .header(USER_AGENT, &self.user_agent)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::RefreshRejected {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            AuthError::InvalidResponse(format!("token endpoint returned unexpected JSON: {err}"))
        })
    }
}
