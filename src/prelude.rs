//! Convenience re-exports for common use.

pub use crate::auth::{AccessTokenProvider, AuthError, BuildingLinkAuth};
pub use crate::client::BuildingLinkClient;
pub use crate::config::{ClientConfig, Credentials, Endpoints, ServiceHost};
pub use crate::error::{BuildingLinkError, Result};
pub use crate::models::*;
