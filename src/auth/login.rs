//! Username/password login through the web sign-in pages.
//!
//! The resident site has no password grant, so the flow drives the same
//! pages a browser would:
//!
//! 1. GET the login page and pull the auth redirect URL out of its script.
//! 2. GET the auth URL and scrape the sign-in form.
//! 3. POST the credentials (redirects not followed).
//! 4. Scrape the callback form from the answer and relay it to the OIDC
//!    callback endpoint, which sets the session cookies.
//! 5. Take the token from the callback form, or fall back to a refresh grant
//!    on the now-authenticated session.

use std::collections::BTreeMap;

use reqwest::header::LOCATION;
use reqwest::{StatusCode, Url};
use tracing::debug;

use super::error::AuthError;
use super::html;
use super::refresh::TokenRefresher;
use super::session::HttpSession;
use crate::config::ClientConfig;
use crate::models::TokenResponse;

/// Callback form fields that may carry the token, in lookup order.
const TOKEN_FIELDS: [&str; 3] = ["access_token", "code", "id_token"];

/// Token obtained by a completed login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginToken {
    /// Taken directly from the callback form.
    CallbackForm(String),
    /// Issued by a refresh grant on the authenticated session.
    Grant(TokenResponse),
}

/// Drives the web login for one set of credentials.
pub struct CredentialLogin<'a> {
    session: &'a HttpSession,
    config: &'a ClientConfig,
}

impl<'a> CredentialLogin<'a> {
    pub fn new(session: &'a HttpSession, config: &'a ClientConfig) -> Self {
        Self { session, config }
    }

    pub async fn run(
        &self,
        username: &str,
        password: &str,
        refresh_token: Option<&str>,
    ) -> Result<LoginToken, AuthError> {
        let endpoints = &self.config.endpoints;
        let client = self.session.client();

        let login_page = client.get(&endpoints.login_url).send().await?.text().await?;
        let auth_url = html::auth_redirect_url(&login_page, &endpoints.auth_redirect_prefix)?;
        debug!(auth_url = %truncate(&auth_url, 80), "found auth redirect URL");

        let resp = client.get(&auth_url).send().await?;
        let page_url = resp.url().clone();
        let sign_in_page = resp.text().await?;

        let mut form = html::hidden_inputs(&sign_in_page);
        form.insert("Username".to_string(), username.to_string());
        form.insert("Password".to_string(), password.to_string());
        let action_url = match html::form_action(&sign_in_page) {
            Some(action) => resolve(&page_url, &action)?,
            None => page_url,
        };

        let callback_form = self.submit_credentials(&action_url, &form).await?;
        if callback_form.is_empty() {
            return Err(AuthError::LoginFlow(
                "no callback form data received, check credentials".to_string(),
            ));
        }

        let callback = client
            .post(&endpoints.oidc_callback_url)
            .form(&callback_form)
            .send()
            .await?;
        debug!(status = %callback.status(), "posted OIDC callback form");

        if let Some(token) = token_from_form(&callback_form) {
            debug!("authenticated via web login");
            return Ok(LoginToken::CallbackForm(token));
        }

        let refresher = TokenRefresher::new(self.config);
        match refresher
            .exchange(client, refresh_token.unwrap_or_default())
            .await
        {
            Ok(grant) => {
                debug!("authenticated via web login session grant");
                Ok(LoginToken::Grant(grant))
            }
            Err(err) => {
                debug!(error = %err, "session grant after login failed");
                Err(AuthError::LoginFlow(
                    "login succeeded but could not extract access token".to_string(),
                ))
            }
        }
    }

    async fn submit_credentials(
        &self,
        action_url: &Url,
        form: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, AuthError> {
        let resp = self
            .session
            .no_redirect_client()
            .post(action_url.clone())
            .form(form)
            .send()
            .await?;
        let status = resp.status();

        if status == StatusCode::OK {
            let body = resp.text().await?;
            if looks_like_rejection(&body) {
                return Err(AuthError::InvalidCredentials);
            }
            return Ok(html::hidden_inputs(&body));
        }

        if status.is_redirection() {
            let location = resp
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    AuthError::LoginFlow(format!("{status} redirect without Location"))
                })?;
            let target = resolve(action_url, location)?;
            debug!(%status, "credential post redirected");
            let body = self.session.client().get(target).send().await?.text().await?;
            return Ok(html::hidden_inputs(&body));
        }

        let body = resp.text().await?;
        Ok(html::hidden_inputs(&body))
    }
}

/// A 200 answer to the credential post means the form came back with a
/// validation message.
fn looks_like_rejection(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("invalid") || lower.contains("error")
}

fn token_from_form(form: &BTreeMap<String, String>) -> Option<String> {
    TOKEN_FIELDS
        .iter()
        .find_map(|key| form.get(*key))
        .filter(|value| !value.is_empty())
        .cloned()
}

fn resolve(base: &Url, target: &str) -> Result<Url, AuthError> {
    base.join(target)
        .map_err(|err| AuthError::LoginFlow(format!("invalid login URL {target}: {err}")))
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
