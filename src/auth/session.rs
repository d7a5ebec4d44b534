use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::redirect::Policy;

use crate::config::ClientConfig;

/// Cookie-carrying HTTP session shared by the auth flows and the API calls.
///
/// The web login needs to post credentials without following the redirect
/// that answers them, so the session keeps two clients over one cookie jar.
#[derive(Debug, Clone)]
pub struct HttpSession {
    follow: reqwest::Client,
    manual: reqwest::Client,
    cookies: Arc<Jar>,
}

impl HttpSession {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let cookies = Arc::new(Jar::default());
        let follow = reqwest::Client::builder()
            .cookie_provider(cookies.clone())
            .timeout(config.request_timeout)
            .build()?;
        let manual = reqwest::Client::builder()
            .cookie_provider(cookies.clone())
            .redirect(Policy::none())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            follow,
            manual,
            cookies,
        })
    }

    /// Client that follows redirects.
    pub fn client(&self) -> &reqwest::Client {
        &self.follow
    }

    /// Client that returns 3xx responses to the caller.
    pub fn no_redirect_client(&self) -> &reqwest::Client {
        &self.manual
    }

    pub fn cookies(&self) -> &Arc<Jar> {
        &self.cookies
    }
}
