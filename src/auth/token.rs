use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TokenResponse;

/// Snapshot of the tokens held for a session.
///
/// # Example
/// ```
/// use buildinglink::auth::Token;
///
/// let token = Token::with_refresh_token("refresh");
/// assert!(token.access_token.is_none());
/// assert!(!token.is_valid(std::time::Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Token {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl Token {
    pub fn with_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
            ..Self::default()
        }
    }

    /// Whether the access token is usable for at least `buffer` more.
    pub fn is_valid(&self, buffer: std::time::Duration) -> bool {
        self.is_valid_at(Utc::now(), buffer)
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>, buffer: std::time::Duration) -> bool {
        match (&self.access_token, self.expires_at) {
            (Some(_), Some(expires_at)) => expires_at
                .checked_sub_signed(to_delta(buffer))
                .is_some_and(|limit| now < limit),
            _ => false,
        }
    }

    /// Apply a token endpoint response.
    ///
    /// The refresh token is only replaced when the response carries a new one.
    pub fn apply_response(&mut self, response: TokenResponse, default_lifetime: std::time::Duration) {
        let now = Utc::now();
        let lifetime = response
            .expires_in
            .and_then(TimeDelta::try_seconds)
            .unwrap_or_else(|| to_delta(default_lifetime));
        self.access_token = Some(response.access_token);
        if let Some(refresh_token) = response.refresh_token.filter(|t| !t.is_empty()) {
            self.refresh_token = Some(refresh_token);
        }
        if response.id_token.is_some() {
            self.id_token = response.id_token;
        }
        self.expires_at = Some(expiry(now, lifetime));
        self.last_refresh = Some(now);
    }

    pub fn set_access_token(&mut self, access_token: String, lifetime: std::time::Duration) {
        let now = Utc::now();
        self.access_token = Some(access_token);
        self.expires_at = Some(expiry(now, to_delta(lifetime)));
        self.last_refresh = Some(now);
    }

    /// Drop the access token so the next lookup has to renew it.
    pub fn invalidate(&mut self) {
        self.access_token = None;
        self.expires_at = None;
    }
}

/// Lifetimes reaching past the representable range saturate at the maximum.
fn expiry(now: DateTime<Utc>, lifetime: TimeDelta) -> DateTime<Utc> {
    now.checked_add_signed(lifetime)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn to_delta(duration: std::time::Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or_else(|_| TimeDelta::days(36_500))
}
