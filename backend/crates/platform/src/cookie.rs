//! Cookie Handling
//!
//! Builds `Set-Cookie` values for the session token cookie and reads cookies
//! back out of request headers.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue};
use axum_extra::extract::cookie::CookieJar;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by every cookie of one name
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl CookieConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }

    /// `Set-Cookie` value that stores `value` for `max_age`
    ///
    /// Always `HttpOnly`: the cookie carries a credential scripts never need.
    pub fn issue(&self, value: &str, max_age: Duration) -> Result<HeaderValue, CookieError> {
        let cookie = format!(
            "{}={}; {}; Max-Age={}",
            self.name,
            value,
            self.attributes(),
            max_age.as_secs()
        );
        HeaderValue::from_str(&cookie).map_err(|_| CookieError::InvalidValue)
    }

    /// `Set-Cookie` value that makes the browser drop the cookie
    pub fn expire(&self) -> HeaderValue {
        let cookie = format!(
            "{}=; {}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.name,
            self.attributes()
        );
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    fn attributes(&self) -> String {
        let mut attrs = format!(
            "HttpOnly; Path={}; SameSite={}",
            self.path,
            self.same_site.as_str()
        );
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CookieError {
    #[error("Cookie value contains characters not allowed in a header")]
    InvalidValue,
}

/// Value of the named cookie, if the request carries it
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}
