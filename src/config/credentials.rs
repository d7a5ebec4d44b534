//! Long-lived credentials used to obtain access tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Username/password and/or refresh token for a resident account.
///
/// Blank values are treated as absent.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub refresh_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| ".."))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| ".."))
            .finish()
    }
}

impl Credentials {
    /// Credentials for the web login flow.
    pub fn login(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            refresh_token: None,
        }
    }

    /// Credentials holding only a refresh token.
    pub fn refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: Some(refresh_token.into()),
            ..Self::default()
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Read `BUILDINGLINK_USERNAME`, `BUILDINGLINK_PASSWORD` and
    /// `BUILDINGLINK_REFRESH_TOKEN`, loading `.env` first when present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            username: lookup("BUILDINGLINK_USERNAME"),
            password: lookup("BUILDINGLINK_PASSWORD"),
            refresh_token: lookup("BUILDINGLINK_REFRESH_TOKEN"),
        }
        .normalized()
    }

    /// Drop blank values.
    pub fn normalized(self) -> Self {
        Self {
            username: non_blank(self.username),
            password: non_blank(self.password),
            refresh_token: non_blank(self.refresh_token),
        }
    }

    pub fn has_login(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
