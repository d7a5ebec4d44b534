#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use buildinglink::auth::{AccessTokenProvider, AuthError, BuildingLinkAuth};
use buildinglink::config::{ClientConfig, Credentials, Endpoints};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "resident";
pub const PASSWORD: &str = "hunter2";

/// Config that sends every auth and API call to `server`.
pub fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_endpoints(Endpoints::all_at(&server.uri()))
}

pub fn auth_with(credentials: Credentials, server: &MockServer) -> BuildingLinkAuth {
    BuildingLinkAuth::new(credentials, mock_config(server)).expect("auth manager")
}

pub fn token_body(access_token: &str, refresh_token: Option<&str>, expires_in: i64) -> serde_json::Value {
    let mut body = json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": expires_in,
    });
    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = json!(refresh_token);
    }
    body
}

/// Token endpoint answering a refresh grant for `refresh_token`.
pub async fn mount_refresh(
    server: &MockServer,
    refresh_token: &str,
    response: ResponseTemplate,
    expected_calls: u64,
) {
    Mock::given(method("POST"))
        .and(path("/connect/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains(format!("refresh_token={refresh_token}")))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Login page, sign-in form and OIDC callback for the web login.
///
/// `credential_answer` is what the sign-in form post returns.
pub async fn mount_login_pages(server: &MockServer, credential_answer: ResponseTemplate) {
    let login_page = format!(
        r#"<html><script>window.location.href = "{}/connect/authorize?client_id=web&amp;state=xyz";</script></html>"#,
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page))
        .expect(1)
        .mount(server)
        .await;

    let sign_in_page = r#"
        <form method="post" action="/Account/Login?ReturnUrl=%2Fconnect">
            <input type="hidden" name="__RequestVerificationToken" value="csrf-1" />
            <input type="text" name="Username" />
            <input type="password" name="Password" />
        </form>"#;
    Mock::given(method("GET"))
        .and(path("/connect/authorize"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sign_in_page))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .and(body_string_contains(format!("Username={USERNAME}")))
        .and(body_string_contains(format!("Password={PASSWORD}")))
        .and(body_string_contains("__RequestVerificationToken=csrf-1"))
        .respond_with(credential_answer)
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/signin-oidc"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Hidden-input form the sign-in server hands back after a good login.
pub fn callback_form(fields: &[(&str, &str)]) -> String {
    let inputs: String = fields
        .iter()
        .map(|(name, value)| format!(r#"<input type="hidden" name="{name}" value="{value}" />"#))
        .collect();
    format!(r#"<form method="post" action="/signin-oidc">{inputs}</form>"#)
}

/// Provider that hands out a fixed token and a fixed replacement.
pub struct StaticTokens {
    current: Mutex<String>,
    renewed: String,
    rejected: Mutex<Vec<String>>,
}

impl StaticTokens {
    pub fn new(current: &str, renewed: &str) -> Self {
        Self {
            current: Mutex::new(current.to_string()),
            renewed: renewed.to_string(),
            rejected: Mutex::new(Vec::new()),
        }
    }

    pub fn rejected(&self) -> Vec<String> {
        self.rejected.lock().expect("rejected lock poisoned").clone()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokens {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.current.lock().expect("token lock poisoned").clone())
    }

    async fn renew_access_token(&self, rejected: &str) -> Result<String, AuthError> {
        self.rejected
            .lock()
            .expect("rejected lock poisoned")
            .push(rejected.to_string());
        let mut current = self.current.lock().expect("token lock poisoned");
        *current = self.renewed.clone();
        Ok(current.clone())
    }
}
