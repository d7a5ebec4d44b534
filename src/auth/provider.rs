use async_trait::async_trait;

use super::error::AuthError;

/// Source of bearer tokens for the request layer.
///
/// [`BuildingLinkAuth`](super::BuildingLinkAuth) is the production
/// implementation; anything else that can mint tokens may stand in for it.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// A token that is valid right now, renewing it first if needed.
    async fn access_token(&self) -> Result<String, AuthError>;

    /// Renew after the server rejected `rejected`.
    ///
    /// When `rejected` is still the current token it is discarded before a
    /// new one is obtained; a token another caller already renewed is reused.
    async fn renew_access_token(&self, rejected: &str) -> Result<String, AuthError>;
}
