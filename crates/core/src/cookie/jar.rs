//! Cookie jar backends

use crate::error::CoreResult;
use chrono::{DateTime, Utc};
use std::cell::RefCell;

/// Raw access to a cookie jar, shaped like `document.cookie`
pub trait CookieJar {
    /// All visible cookies as `a=1; b=2`
    fn cookie_string(&self) -> CoreResult<String>;

    /// Apply a single `name=value; attr...` assignment
    fn write(&self, cookie: &str) -> CoreResult<()>;
}

#[derive(Clone, Debug)]
struct StoredCookie {
    name: String,
    value: String,
    path: String,
    expires_at: Option<DateTime<Utc>>,
}

impl StoredCookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory jar with browser-like replace and expiry rules
///
/// Cookies are keyed by name and path. Writing a cookie whose `expires` is
/// in the past, or whose `max-age` is not positive, deletes it.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RefCell<Vec<StoredCookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live cookies
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.cookies
            .borrow()
            .iter()
            .filter(|cookie| !cookie.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cookies.borrow_mut().clear();
    }
}

impl CookieJar for MemoryCookieJar {
    fn cookie_string(&self) -> CoreResult<String> {
        let now = Utc::now();
        let mut cookies = self.cookies.borrow_mut();
        cookies.retain(|cookie| !cookie.is_expired(now));

        Ok(cookies
            .iter()
            .map(|cookie| format!("{}={}", cookie.name, cookie.value))
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn write(&self, cookie: &str) -> CoreResult<()> {
        let mut parts = cookie.split(';');
        let pair = parts.next().unwrap_or_default().trim();
        let (name, value) = pair.split_once('=').unwrap_or(("", pair));

        let mut path = "/".to_string();
        let mut expires_at = None;
        let mut max_age = None;

        for attribute in parts {
            let (key, attr_value) = attribute
                .trim()
                .split_once('=')
                .unwrap_or((attribute.trim(), ""));
            match key.to_ascii_lowercase().as_str() {
                "path" if !attr_value.is_empty() => path = attr_value.to_string(),
                "expires" => {
                    expires_at = DateTime::parse_from_rfc2822(attr_value)
                        .ok()
                        .map(|at| at.with_timezone(&Utc));
                }
                "max-age" => max_age = attr_value.parse::<i64>().ok(),
                _ => {}
            }
        }

        let now = Utc::now();
        if let Some(seconds) = max_age {
            expires_at = Some(
                chrono::TimeDelta::try_seconds(seconds)
                    .and_then(|lifetime| now.checked_add_signed(lifetime))
                    .unwrap_or_else(|| {
                        if seconds > 0 {
                            DateTime::<Utc>::MAX_UTC
                        } else {
                            DateTime::<Utc>::MIN_UTC
                        }
                    }),
            );
        }

        let stored = StoredCookie {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
            path,
            expires_at,
        };

        let mut cookies = self.cookies.borrow_mut();
        let existing = cookies
            .iter()
            .position(|cookie| cookie.name == stored.name && cookie.path == stored.path);

        match (existing, stored.is_expired(now)) {
            (Some(index), true) => {
                cookies.remove(index);
            }
            (Some(index), false) => cookies[index] = stored,
            (None, true) => {}
            (None, false) => cookies.push(stored),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_cookie_with_same_name_and_path() {
        let jar = MemoryCookieJar::new();
        jar.write("token=one; path=/").unwrap();
        jar.write("token=two; path=/").unwrap();
        assert_eq!(jar.cookie_string().unwrap(), "token=two");
        assert_eq!(jar.len(), 1);
    }

    #[test]
    fn keeps_cookies_on_distinct_paths() {
        let jar = MemoryCookieJar::new();
        jar.write("token=root; path=/").unwrap();
        jar.write("token=app; path=/app").unwrap();
        assert_eq!(jar.cookie_string().unwrap(), "token=root; token=app");
    }

    #[test]
    fn past_expiry_deletes() {
        let jar = MemoryCookieJar::new();
        jar.write("token=abc; path=/").unwrap();
        jar.write("token=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/")
            .unwrap();
        assert!(jar.is_empty());
    }

    #[test]
    fn non_positive_max_age_deletes() {
        let jar = MemoryCookieJar::new();
        jar.write("token=abc").unwrap();
        jar.write("token=abc; max-age=0").unwrap();
        assert_eq!(jar.cookie_string().unwrap(), "");
    }

    #[test]
    fn future_expiry_is_kept() {
        let jar = MemoryCookieJar::new();
        jar.write("token=abc; path=/; expires=Wed, 01 Jan 2200 00:00:00 GMT")
            .unwrap();
        assert_eq!(jar.cookie_string().unwrap(), "token=abc");
    }

    #[test]
    fn out_of_range_max_age_saturates() {
        let jar = MemoryCookieJar::new();
        jar.write("token=abc; max-age=9223372036854775807").unwrap();
        assert_eq!(jar.cookie_string().unwrap(), "token=abc");

        jar.write("token=abc; max-age=-9223372036854775808").unwrap();
        assert!(jar.is_empty());
    }
}
