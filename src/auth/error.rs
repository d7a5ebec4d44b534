use thiserror::Error;

/// Errors raised while obtaining or refreshing access tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Either username/password or refresh_token must be provided")]
    MissingCredentials,
    #[error("No refresh token available")]
    MissingRefreshToken,
    #[error("No valid authentication method available")]
    NoAuthMethod,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Access token expired and could not be renewed: {0}")]
    TokenExpired(String),
    #[error("Token refresh failed ({status}): {body}")]
    RefreshRejected { status: u16, body: String },
    #[error("Login failed: {0}")]
    LoginFlow(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
