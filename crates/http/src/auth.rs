//! Login and logout against the configured endpoints
//!
//! Both operations report only a generic failure to the caller; the
//! underlying cause is logged at debug level.

use crate::client::ApiClient;
use crate::client::error::ClientError;
use crate::types::{LoginRequest, LoginResponse};
use latch_core::cookie::{CookieOptions, erase_cookie, get_cookie, set_cookie};
use latch_core::{AuthOptions, CookieJar, CoreError};
use reqwest::Method;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors surfaced by login and logout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Logout failed")]
    LogoutFailed,
}

#[derive(Debug, Error)]
enum Failure {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Cookie(#[from] CoreError),

    #[error("login response carried an empty token")]
    EmptyToken,
}

/// POST the credentials and store the returned token in the token cookie.
///
/// Returns the token so callers can update their state without re-reading
/// the cookie jar.
pub async fn login<J>(
    username: &str,
    password: &str,
    options: &AuthOptions,
    jar: &J,
) -> Result<String, AuthError>
where
    J: CookieJar + ?Sized,
{
    debug!(url = %options.login_url(), "Logging in");

    try_login(username, password, options, jar)
        .await
        .map_err(|error| {
            debug!(%error, "Login failed");
            AuthError::AuthenticationFailed
        })
}

async fn try_login<J>(
    username: &str,
    password: &str,
    options: &AuthOptions,
    jar: &J,
) -> Result<String, Failure>
where
    J: CookieJar + ?Sized,
{
    let client = ApiClient::new(options.base_url.clone(), None)?;
    let response: LoginResponse = client
        .post(&options.login_endpoint, &LoginRequest { username, password })
        .await?;

    if response.token.is_empty() {
        return Err(Failure::EmptyToken);
    }

    let cookie = CookieOptions::new().expires_in(options.cookie_lifetime());
    set_cookie(jar, options.cookie_name(), &response.token, &cookie)?;

    Ok(response.token)
}

/// Erase the token cookie, then POST to the logout endpoint.
///
/// The cookie is gone before the request is sent; an error only tells the
/// caller that the server was not told.
pub async fn logout<J>(options: &AuthOptions, jar: &J) -> Result<(), AuthError>
where
    J: CookieJar + ?Sized,
{
    begin_logout(options, jar).send().await
}

/// Erase the token cookie now and return the server notification still to send.
pub fn begin_logout<J>(options: &AuthOptions, jar: &J) -> PendingLogout
where
    J: CookieJar + ?Sized,
{
    let token = get_cookie(jar, options.cookie_name());
    let erased = match erase_cookie(jar, options.cookie_name()) {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "Failed to erase token cookie");
            false
        }
    };

    PendingLogout {
        base_url: options.base_url.clone(),
        logout_url: options.logout_url.clone(),
        token,
        erased,
    }
}

/// Logout request for a session whose cookie has already been erased
#[must_use = "the server is only notified once `send` is awaited"]
pub struct PendingLogout {
    base_url: String,
    logout_url: String,
    token: Option<String>,
    erased: bool,
}

impl PendingLogout {
    /// POST to the logout endpoint with the erased token as bearer
    pub async fn send(self) -> Result<(), AuthError> {
        debug!(base_url = %self.base_url, endpoint = %self.logout_url, "Logging out");

        let request = notify_logout(&self.base_url, &self.logout_url, self.token).await;

        let mut failed = !self.erased;
        if let Err(error) = request {
            warn!(%error, "Logout request failed");
            failed = true;
        }

        if failed {
            Err(AuthError::LogoutFailed)
        } else {
            Ok(())
        }
    }
}

async fn notify_logout(
    base_url: &str,
    logout_url: &str,
    token: Option<String>,
) -> Result<(), ClientError> {
    let client = ApiClient::new(base_url, token)?;
    let request = client.request(Method::POST, logout_url);
    client.execute_unit(request).await
}
