//! Async client for the BuildingLink resident API.
//!
//! Turns long-lived credentials (a refresh token, or a username/password
//! pair driven through the web login) into short-lived bearer tokens and
//! exposes typed accessors for packages, maintenance requests,
//! announcements, amenities, contacts and the resident profile.
//!
//! # Quick Start
//!
//! ```no_run
//! use buildinglink::prelude::*;
//!
//! # async fn example() -> buildinglink::Result<()> {
//! let client = BuildingLinkClient::new(Credentials::refresh_token("refresh-token"))?;
//! let profile = client.user_profile().await?;
//! println!("signed in as {}", profile.full_name());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;

#[cfg(feature = "cli")]
pub mod cli;

pub use client::{BuildingLinkClient, PropertyContext};
pub use config::{ClientConfig, Credentials};
pub use error::{BuildingLinkError, Result};
