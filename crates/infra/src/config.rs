//! Configuration loading and the startup environment validator.
//!
//! Everything is read from process environment variables. Each loader has a
//! `from_lookup` twin taking an arbitrary key lookup so tests never have to
//! mutate the real environment.

use std::net::SocketAddr;

use thiserror::Error;

pub const BACKEND_URL: &str = "BACKEND_URL";
pub const BACKEND_SERVICE_ROLE_KEY: &str = "BACKEND_SERVICE_ROLE_KEY";
pub const PUBLIC_BACKEND_URL: &str = "PUBLIC_BACKEND_URL";
pub const PUBLIC_BACKEND_ANON_KEY: &str = "PUBLIC_BACKEND_ANON_KEY";
pub const BIND_ADDR: &str = "BIND_ADDR";
pub const ROOMS_PUBLIC_READ: &str = "ROOMS_PUBLIC_READ";
pub const EMAIL_API_URL: &str = "EMAIL_API_URL";
pub const EMAIL_API_KEY: &str = "EMAIL_API_KEY";
pub const EMAIL_FROM: &str = "EMAIL_FROM";
pub const EMAIL_TEST_TO: &str = "EMAIL_TEST_TO";

/// Keys the server cannot start without.
pub const SERVER_REQUIRED_ENV: [&str; 2] = [BACKEND_URL, BACKEND_SERVICE_ROLE_KEY];

/// Client-context pair; checked by `check-env`, not enforced by the server.
pub const PUBLIC_REQUIRED_ENV: [&str; 2] = [PUBLIC_BACKEND_URL, PUBLIC_BACKEND_ANON_KEY];

pub const EMAIL_REQUIRED_ENV: [&str; 3] = [EMAIL_API_URL, EMAIL_API_KEY, EMAIL_FROM];

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(String),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Check that every key in `keys` is present in the process environment.
///
/// Stops at the first missing key, in list order.
pub fn require_env(keys: &[&str]) -> Result<(), ConfigError> {
    require_vars(keys, env_lookup)
}

/// [`require_env`] against an arbitrary lookup.
///
/// Blank values count as missing.
pub fn require_vars<F>(keys: &[&str], lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for key in keys {
        if non_blank(&lookup, key).is_none() {
            return Err(ConfigError::Missing((*key).to_string()));
        }
    }
    Ok(())
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(lookup, key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

/// Server-side credentials for the managed backend.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub service_role_key: String,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        require_vars(&SERVER_REQUIRED_ENV, &lookup)?;
        let url = required(&lookup, BACKEND_URL)?;
        Ok(Self {
            url: url.trim().trim_end_matches('/').to_string(),
            service_role_key: required(&lookup, BACKEND_SERVICE_ROLE_KEY)?,
        })
    }
}

impl core::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .finish()
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Serve `GET /api/rooms` without a role check.
    pub rooms_public_read: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = non_blank(&lookup, BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.trim().parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: BIND_ADDR.to_string(),
            message: format!("{e}"),
        })?;

        let rooms_public_read = match non_blank(&lookup, ROOMS_PUBLIC_READ) {
            None => true,
            Some(v) => parse_bool(ROOMS_PUBLIC_READ, &v)?,
        };

        Ok(Self {
            bind_addr,
            rooms_public_read,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::Invalid {
            key: key.to_string(),
            message: format!("expected true or false, got '{other}'"),
        }),
    }
}

/// Credentials for the external email-sending API.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub test_recipient: Option<String>,
}

impl EmailConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        require_vars(&EMAIL_REQUIRED_ENV, &lookup)?;
        Ok(Self {
            api_url: required(&lookup, EMAIL_API_URL)?,
            api_key: required(&lookup, EMAIL_API_KEY)?,
            from: required(&lookup, EMAIL_FROM)?,
            test_recipient: non_blank(&lookup, EMAIL_TEST_TO),
        })
    }
}

impl core::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("from", &self.from)
            .field("test_recipient", &self.test_recipient)
            .finish()
    }
}
