//! Environment Configuration Helpers
//!
//! Thin typed wrappers over `std::env::var`. Empty variables count as unset.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Variable that must be present and non-empty
pub fn required_env(name: &'static str) -> Result<String, ConfigError> {
    optional_env(name).ok_or(ConfigError::Missing(name))
}

/// Variable that may be absent
pub fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Parsed variable, or `default` when unset
pub fn env_or<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_or(name, optional_env(name), default)
}

/// Boolean flag accepting `true/false`, `1/0`, `yes/no`, `on/off`
pub fn env_flag(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match optional_env(name) {
        None => Ok(default),
        Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
            name,
            reason: format!("expected a boolean, got {raw:?}"),
        }),
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
