//! Authenticated request layer.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::BuildingLinkClient;
use crate::auth::AuthError;
use crate::error::{BuildingLinkError, Result};

const CORRELATION_ID: &str = "X-Correlation-Id";
const DEVICE_ID_PARAM: &str = "device-id";

/// Build the headers every API call carries.
///
/// A token that cannot be sent as a header value is an error rather than an
/// unauthenticated request.
pub fn api_headers(access_token: &str, user_agent: &str) -> std::result::Result<HeaderMap, AuthError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let bearer = HeaderValue::from_str(&format!("Bearer {access_token}")).map_err(|_| {
        AuthError::InvalidResponse("access token is not a valid header value".to_string())
    })?;
    headers.insert(AUTHORIZATION, bearer);
    if let Ok(val) = HeaderValue::from_str(user_agent) {
        headers.insert(USER_AGENT, val);
    }
    if let Ok(val) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
        headers.insert(CORRELATION_ID, val);
    }
    Ok(headers)
}

impl BuildingLinkClient {
    /// Issue an authenticated call and return the JSON payload.
    ///
    /// The device id is appended to `query`. A 401 triggers one token
    /// renewal and one retry; any error status after that is returned as
    /// [`BuildingLinkError::Api`]. An empty body reads as `null`.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let token = self.tokens.access_token().await?;
        let resp = self.send(&method, url, query, body, &token).await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return read_json(resp).await;
        }

        debug!(%method, %url, "access token rejected, renewing and retrying once");
        let token = self.tokens.renew_access_token(&token).await?;
        let retry = self.send(&method, url, query, body, &token).await?;
        read_json(retry).await
    }

    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.request(Method::GET, url, query, None).await
    }

    pub async fn post(&self, url: &str, query: &[(&str, &str)], body: &Value) -> Result<Value> {
        self.request(Method::POST, url, query, Some(body)).await
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        access_token: &str,
    ) -> Result<Response> {
        let mut params: Vec<(&str, &str)> = query.to_vec();
        params.push((DEVICE_ID_PARAM, self.device_id.as_str()));

        let mut request = self
            .http
            .request(method.clone(), url)
            .headers(api_headers(access_token, &self.config.user_agent)?)
            .query(&params);
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }
}

async fn read_json(resp: Response) -> Result<Value> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        let text = resp.text().await.unwrap_or_default();
        return Err(BuildingLinkError::api(status.as_u16(), text));
    }
    let bytes = resp.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
