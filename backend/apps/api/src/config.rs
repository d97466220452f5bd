//! Server Configuration
//!
//! Everything the process reads from the environment, loaded once at startup.

use std::fmt;

use auth::{AuthConfig, SigningSecret};
use music::StorageConfig;
use platform::config::{ConfigError, env_flag, env_or, optional_env, required_env};

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Object storage for uploads; all variables or none
const STORAGE_VARS: [&str; 5] = [
    "AWS_REGION",
    "AWS_BUCKET_NAME",
    "AWS_S3_BUCKET_ACCESS_KEY",
    "AWS_S3_BUCKET_SECRET_ACCESS_KEY",
    "CDN_URL",
];

pub struct ServerConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub jwt_secret: SigningSecret,
    pub cookie_secure: bool,
    pub password_pepper: Option<Vec<u8>>,
    pub frontend_origins: Vec<String>,
    pub storage: Option<UploadStorage>,
}

#[derive(Debug, Clone)]
pub struct UploadStorage {
    pub bucket: StorageConfig,
    pub cdn_base_url: String,
}

impl ServerConfig {
    /// Missing `DATABASE_URL` or `JWT_SECRET` is an error; the rest have defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = SigningSecret::new(required_env("JWT_SECRET")?).map_err(|e| {
            ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            database_url: required_env("DATABASE_URL")?,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            port: env_or("PORT", 8080)?,
            jwt_secret,
            cookie_secure: env_flag("COOKIE_SECURE", true)?,
            password_pepper: optional_env("PASSWORD_PEPPER").map(String::into_bytes),
            frontend_origins: parse_origins(
                &optional_env("FRONTEND_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string()),
            ),
            storage: storage_from_env()?,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            cookie_secure: self.cookie_secure,
            password_pepper: self.password_pepper.clone(),
            ..AuthConfig::new(self.jwt_secret.clone())
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("db_max_connections", &self.db_max_connections)
            .field("port", &self.port)
            .field("cookie_secure", &self.cookie_secure)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("frontend_origins", &self.frontend_origins)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

fn storage_from_env() -> Result<Option<UploadStorage>, ConfigError> {
    if STORAGE_VARS.iter().all(|name| optional_env(name).is_none()) {
        return Ok(None);
    }

    Ok(Some(UploadStorage {
        bucket: StorageConfig {
            region: required_env("AWS_REGION")?,
            bucket: required_env("AWS_BUCKET_NAME")?,
            access_key_id: required_env("AWS_S3_BUCKET_ACCESS_KEY")?,
            secret_access_key: required_env("AWS_S3_BUCKET_SECRET_ACCESS_KEY")?,
        },
        cdn_base_url: required_env("CDN_URL")?,
    }))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" https://a.example.com, ,https://b.example.com "),
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_default_origins_parse() {
        assert_eq!(parse_origins(DEFAULT_FRONTEND_ORIGINS).len(), 2);
    }
}
