//! Email Value Object
//!
//! Shape check only. Whether the address is deliverable is not our concern.

use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local-part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Lower-cased, trimmed email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> AuthResult<Self> {
        let email = raw.trim().to_lowercase();

        if email.is_empty() {
            return Err(AuthError::validation("email", "must not be empty"));
        }

        if email.chars().count() > EMAIL_MAX_LENGTH {
            return Err(AuthError::validation(
                "email",
                format!("must be at most {EMAIL_MAX_LENGTH} characters"),
            ));
        }

        if !is_valid_format(&email) {
            return Err(AuthError::validation("email", "is not an email address"));
        }

        Ok(Self(email))
    }

    /// Rebuild from a stored value without re-validating
    pub fn from_db(email: String) -> Self {
        Self(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_valid_format(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH || domain.contains('@') {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }

    if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
        return false;
    }

    !email.chars().any(|c| c.is_whitespace() || c.is_control())
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
