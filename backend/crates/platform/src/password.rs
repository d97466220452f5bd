//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, salted, PHC string output)
//! - Zeroization of clear text and peppered buffers
//! - Constant-time verification (argon2's output comparison)
//! - Optional application-wide pepper

use std::fmt;

use argon2::password_hash::{PasswordHasher as _, PasswordVerifier as _};
use argon2::{Algorithm, Argon2, Params, PasswordHash, Version, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Upper bound on accepted passwords, in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

const DECOY_SALT: &[u8] = b"decoy-verification-salt";

// ============================================================================
// Error Types
// ============================================================================

/// Password shape violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Hashing failures
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid Argon2 cost parameters: {0}")]
    InvalidCost(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password
///
/// Not `Clone`, redacted in `Debug`, wiped from memory on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate and NFKC-normalize a password
    ///
    /// The raw input buffer is wiped whether or not validation succeeds.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized = Self(raw.nfkc().collect());

        if normalized.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.0.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(normalized)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
///
/// Carries algorithm, version, cost parameters and salt, so it can be
/// verified without knowing how it was produced.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a stored PHC string (e.g., from the database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id cost profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashCost {
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }
}

impl Default for HashCost {
    /// OWASP profile: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self::new(19_456, 2, 1)
    }
}

/// Salted one-way password hasher
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    pepper: Option<Zeroizing<Vec<u8>>>,
}

impl PasswordHasher {
    pub fn new(cost: HashCost, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            pepper: pepper.map(Zeroizing::new),
        })
    }

    /// Hash with a fresh random salt
    ///
    /// Two calls with the same password never return the same string.
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let input = self.peppered(password);
        let salt = SaltString::generate(OsRng);

        let hash = self
            .argon2
            .hash_password(&input, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Check a password against a stored hash
    ///
    /// Returns `false` on mismatch and on an unparsable stored hash; never errors.
    /// Cost parameters come from the stored hash, not from this hasher.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return false;
        };

        let input = self.peppered(password);
        self.argon2.verify_password(&input, &parsed).is_ok()
    }

    /// Spend one verification's worth of work with nothing to compare against
    ///
    /// For callers that have no stored hash but must not answer faster than
    /// `verify` would.
    pub fn verify_decoy(&self, password: &ClearTextPassword) {
        let input = self.peppered(password);
        let mut output = Zeroizing::new([0u8; 32]);
        let _ = self
            .argon2
            .hash_password_into(&input, DECOY_SALT, &mut output[..]);
    }

    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(password.as_bytes().to_vec());
        if let Some(pepper) = &self.pepper {
            bytes.extend_from_slice(pepper);
        }
        bytes
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher(pepper: Option<&[u8]>) -> PasswordHasher {
        PasswordHasher::new(HashCost::new(1024, 1, 1), pepper.map(<[u8]>::to_vec)).unwrap()
    }

    fn pw(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_password_empty_or_whitespace() {
        assert_eq!(
            ClearTextPassword::new(String::new()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
        assert_eq!(
            ClearTextPassword::new("   \t ".to_string()).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
        assert!(ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH)).is_ok());
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("abc\u{0007}def".to_string());
        assert_eq!(result.unwrap_err(), PasswordPolicyError::InvalidCharacter);
    }

    #[test]
    fn test_nfkc_equivalent_passwords_verify() {
        let hasher = fast_hasher(None);
        // U+FF21 FULLWIDTH LATIN CAPITAL LETTER A normalizes to "A"
        let hashed = hasher.hash(&pw("\u{FF21}bcdef")).unwrap();
        assert!(hasher.verify(&pw("Abcdef"), &hashed));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher(None);
        let hashed = hasher.hash(&pw("correct horse")).unwrap();

        assert!(hasher.verify(&pw("correct horse"), &hashed));
        assert!(!hasher.verify(&pw("correct horsf"), &hashed));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher(None);
        let a = hasher.hash(&pw("same input")).unwrap();
        let b = hasher.hash(&pw("same input")).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
        assert!(a.as_phc_string().starts_with("$argon2id$"));
    }

    #[test]
    fn test_pepper_must_match() {
        let peppered = fast_hasher(Some(b"pepper"));
        let hashed = peppered.hash(&pw("secret value")).unwrap();

        assert!(peppered.verify(&pw("secret value"), &hashed));
        assert!(!fast_hasher(None).verify(&pw("secret value"), &hashed));
        assert!(!fast_hasher(Some(b"other")).verify(&pw("secret value"), &hashed));
    }

    #[test]
    fn test_verify_uses_cost_from_stored_hash() {
        let cheap = fast_hasher(None);
        let hashed = cheap.hash(&pw("portable")).unwrap();

        let other_cost = PasswordHasher::new(HashCost::new(2048, 2, 1), None).unwrap();
        assert!(other_cost.verify(&pw("portable"), &hashed));
    }

    #[test]
    fn test_verify_decoy_accepts_any_password() {
        let hasher = fast_hasher(Some(b"pepper"));
        hasher.verify_decoy(&pw("anything at all"));
        hasher.verify_decoy(&pw(&"x".repeat(MAX_PASSWORD_LENGTH)));
    }

    #[test]
    fn test_garbage_hash_does_not_verify() {
        let hasher = fast_hasher(None);
        let bogus = HashedPassword {
            hash: "not a phc string".to_string(),
        };
        assert!(!hasher.verify(&pw("anything"), &bogus));
        assert!(HashedPassword::from_phc_string("not a phc string").is_err());
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = PasswordHasher::new(HashCost::new(1, 0, 0), None);
        assert!(matches!(result, Err(PasswordHashError::InvalidCost(_))));
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", pw("hunter22"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("hunter22"));
    }
}
