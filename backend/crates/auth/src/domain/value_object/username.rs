//! Username Value Object

use std::fmt;

use crate::error::{AuthError, AuthResult};

pub const USERNAME_MAX_LENGTH: usize = 32;

/// Trimmed display name, case preserved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> AuthResult<Self> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(AuthError::validation("username", "must not be empty"));
        }

        let len = name.chars().count();
        if len > USERNAME_MAX_LENGTH {
            return Err(AuthError::validation(
                "username",
                format!("must be at most {USERNAME_MAX_LENGTH} characters (got {len})"),
            ));
        }

        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AuthError::validation(
                "username",
                "must not contain whitespace or control characters",
            ));
        }

        Ok(Self(name.to_owned()))
    }

    /// Rebuild from a stored value without re-validating
    pub fn from_db(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_trimmed_and_case_preserved() {
        assert_eq!(Username::new("  DjShadow ").unwrap().as_str(), "DjShadow");
    }

    #[test]
    fn test_username_empty() {
        assert!(Username::new("").is_err());
        assert!(Username::new(" \t ").is_err());
    }

    #[test]
    fn test_username_length() {
        assert!(Username::new(&"x".repeat(USERNAME_MAX_LENGTH)).is_ok());
        assert!(Username::new(&"x".repeat(USERNAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_username_inner_whitespace() {
        let err = Username::new("dj shadow").unwrap_err();
        assert!(matches!(err, AuthError::Validation { field: "username", .. }));
    }
}
