//! Cookie store: get, set and erase named strings in a cookie jar
//!
//! Names and values are percent-encoded the way `encodeURIComponent` does,
//! so values containing `;`, `=` or spaces survive a round trip. Attribute
//! keys are written as given and are not validated.

mod jar;

pub use jar::{CookieJar, MemoryCookieJar};

use crate::error::CoreResult;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// `strftime` layout of the cookie `expires` attribute
pub const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// An `expires` value that is always in the past
pub const EXPIRED_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Latest `expires` date browsers accept: `Fri, 31 Dec 9999 23:59:59 GMT`
pub fn max_cookie_date() -> DateTime<Utc> {
    DateTime::from_timestamp(253_402_300_799, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Cookie expiry in any of the accepted shapes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expires {
    At(DateTime<Utc>),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
    /// Already formatted, written verbatim
    Raw(String),
}

impl Expires {
    /// Expiry `lifetime` from now
    pub fn after(lifetime: Duration) -> Self {
        let at = chrono::TimeDelta::from_std(lifetime)
            .ok()
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .unwrap_or_else(max_cookie_date);
        Self::At(at)
    }

    /// Normalize to the cookie-standard UTC string
    pub fn to_cookie_string(&self) -> Option<String> {
        match self {
            Self::At(at) => Some(format_date(*at)),
            Self::Timestamp(millis) => DateTime::from_timestamp_millis(*millis).map(format_date),
            Self::Raw(raw) => Some(raw.clone()),
        }
    }
}

fn format_date(at: DateTime<Utc>) -> String {
    at.min(max_cookie_date())
        .format(COOKIE_DATE_FORMAT)
        .to_string()
}

impl From<DateTime<Utc>> for Expires {
    fn from(at: DateTime<Utc>) -> Self {
        Self::At(at)
    }
}

/// Attributes written after `name=value`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CookieOptions {
    path: Option<String>,
    expires: Option<Expires>,
    attributes: Vec<(String, Option<String>)>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the default `/` path
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn expires(mut self, expires: impl Into<Expires>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    #[must_use]
    pub fn expires_in(self, lifetime: Duration) -> Self {
        self.expires(Expires::after(lifetime))
    }

    /// Add a `key=value` attribute
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), Some(value.to_string())));
        self
    }

    /// Add a bare attribute such as `secure`
    #[must_use]
    pub fn flag(mut self, key: impl Into<String>) -> Self {
        self.attributes.push((key.into(), None));
        self
    }
}

/// Serialize a cookie assignment without writing it anywhere
pub fn format_cookie(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut cookie = format!(
        "{}={}; path={}",
        urlencoding::encode(name),
        urlencoding::encode(value),
        options.path.as_deref().unwrap_or("/")
    );

    if let Some(expires) = &options.expires {
        match expires.to_cookie_string() {
            Some(expires) => {
                cookie.push_str("; expires=");
                cookie.push_str(&expires);
            }
            None => tracing::warn!(?expires, "Dropping out-of-range cookie expiry"),
        }
    }

    for (key, value) in &options.attributes {
        cookie.push_str("; ");
        cookie.push_str(key);
        if let Some(value) = value {
            cookie.push('=');
            cookie.push_str(value);
        }
    }

    cookie
}

/// Store `value` under `name`
pub fn set_cookie<J>(jar: &J, name: &str, value: &str, options: &CookieOptions) -> CoreResult<()>
where
    J: CookieJar + ?Sized,
{
    jar.write(&format_cookie(name, value, options))
}

/// Read the value stored under `name`.
///
/// Returns `None` when the cookie is missing or empty, or when the jar
/// cannot be read.
pub fn get_cookie<J>(jar: &J, name: &str) -> Option<String>
where
    J: CookieJar + ?Sized,
{
    let raw = match jar.cookie_string() {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(%error, "Failed to read cookies");
            return None;
        }
    };
    let encoded_name = urlencoding::encode(name);

    let value = raw
        .split(';')
        .map(str::trim_start)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == encoded_name)
        .map(|(_, value)| value)?;

    if value.is_empty() {
        return None;
    }

    Some(
        urlencoding::decode(value)
            .map(std::borrow::Cow::into_owned)
            .unwrap_or_else(|_| value.to_string()),
    )
}

/// Overwrite `name` with an already-expired cookie
pub fn erase_cookie<J>(jar: &J, name: &str) -> CoreResult<()>
where
    J: CookieJar + ?Sized,
{
    jar.write(&format!(
        "{}=; expires={EXPIRED_DATE}; path=/",
        urlencoding::encode(name)
    ))
}
