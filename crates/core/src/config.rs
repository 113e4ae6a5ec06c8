//! Authentication configuration

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed authentication constants
pub struct AuthConfig;

impl AuthConfig {
    /// Cookie that holds the auth token
    pub const TOKEN_COOKIE: &'static str = "authToken";

    /// Token cookie lifetime when none is configured
    pub const DEFAULT_COOKIE_EXPIRES_SECS: u64 = 3600;

    /// Where unauthenticated visitors of guarded routes are sent
    pub const LOGIN_PATH: &'static str = "/login";
}

/// Options supplied by the embedding application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthOptions {
    /// Prefix for every request URL. Endpoints are appended verbatim.
    pub base_url: String,
    pub login_endpoint: String,
    pub logout_url: String,
    /// Token cookie lifetime in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_expires: Option<u64>,
}

impl AuthOptions {
    pub fn new(
        base_url: impl Into<String>,
        login_endpoint: impl Into<String>,
        logout_url: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            login_endpoint: login_endpoint.into(),
            logout_url: logout_url.into(),
            cookie_expires: None,
        }
    }

    #[must_use]
    pub fn with_cookie_expires(mut self, secs: u64) -> Self {
        self.cookie_expires = Some(secs);
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Parse and validate options from JSON
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.login_endpoint.is_empty() {
            return Err(CoreError::invalid_config("loginEndpoint must not be empty"));
        }
        if self.logout_url.is_empty() {
            return Err(CoreError::invalid_config("logoutUrl must not be empty"));
        }
        if self.cookie_expires == Some(0) {
            return Err(CoreError::invalid_config(
                "cookieExpires must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn cookie_name(&self) -> &'static str {
        AuthConfig::TOKEN_COOKIE
    }

    /// Lifetime of the token cookie
    pub fn cookie_lifetime(&self) -> Duration {
        Duration::from_secs(
            self.cookie_expires
                .unwrap_or(AuthConfig::DEFAULT_COOKIE_EXPIRES_SECS),
        )
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_endpoint)
    }

    pub fn logout_request_url(&self) -> String {
        format!("{}{}", self.base_url, self.logout_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_options() {
        let options = AuthOptions::from_json(
            r#"{"baseUrl":"https://api.test","loginEndpoint":"/login","logoutUrl":"/logout","cookieExpires":60}"#,
        )
        .unwrap();
        assert_eq!(options.base_url, "https://api.test");
        assert_eq!(options.login_url(), "https://api.test/login");
        assert_eq!(options.logout_request_url(), "https://api.test/logout");
        assert_eq!(options.cookie_lifetime(), Duration::from_secs(60));
    }

    #[test]
    fn defaults_cookie_lifetime_to_an_hour() {
        let options = AuthOptions::new("", "/auth", "/logout");
        assert_eq!(options.cookie_lifetime(), Duration::from_secs(3600));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = AuthOptions::from_json(
            r#"{"baseUrl":"","loginEndpoint":"/a","logoutUrl":"/b","refresh":true}"#,
        );
        assert!(matches!(result, Err(CoreError::Serialization(_))));
    }

    #[test]
    fn rejects_zero_expiry_and_empty_endpoints() {
        let zero = AuthOptions::new("", "/a", "/b").with_cookie_expires(0);
        assert!(matches!(zero.validate(), Err(CoreError::InvalidConfig { .. })));

        let empty = AuthOptions::new("", "", "/b");
        assert!(matches!(empty.validate(), Err(CoreError::InvalidConfig { .. })));
    }
}
