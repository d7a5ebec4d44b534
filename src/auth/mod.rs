//! Token lifecycle: refresh grants, web login, and the in-memory token store.

pub mod error;
pub mod html;
pub mod login;
pub mod manager;
pub mod provider;
pub mod refresh;
pub mod session;
pub mod token;

pub use error::AuthError;
pub use login::{CredentialLogin, LoginToken};
pub use manager::BuildingLinkAuth;
pub use provider::AccessTokenProvider;
pub use refresh::TokenRefresher;
pub use session::HttpSession;
pub use token::Token;
