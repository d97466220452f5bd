//! Password input
//!
//! Clear text passwords are `platform::password::ClearTextPassword`; this
//! only names the field when the policy rejects one.

use platform::password::{ClearTextPassword, PasswordPolicyError};

use crate::error::{AuthError, AuthResult};

pub fn parse_password(field: &'static str, raw: String) -> AuthResult<ClearTextPassword> {
    ClearTextPassword::new(raw).map_err(|e| policy_error(field, e))
}

fn policy_error(field: &'static str, err: PasswordPolicyError) -> AuthError {
    let reason = match err {
        PasswordPolicyError::EmptyOrWhitespace => "must not be empty".to_string(),
        other => other.to_string(),
    };
    AuthError::validation(field, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_names_field() {
        let err = parse_password("new_password", String::new()).unwrap_err();
        assert!(matches!(
            err,
            AuthError::Validation { field: "new_password", .. }
        ));
        assert_eq!(err.to_string(), "Invalid new_password: must not be empty");
    }

    #[test]
    fn test_valid_password() {
        assert!(parse_password("password", "hunter2".into()).is_ok());
    }
}
