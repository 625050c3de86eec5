//! Configuration loading.
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file. They are read once at startup and never mutated afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Placeholder signing secret used when `SECRET_KEY` is unset.
///
/// Anything signed with it is forgeable; real deployments must override it.
pub const INSECURE_DEFAULT_SECRET: &str = "your_default_secret_key_if_missing";

/// Longest accepted `ACCESS_TOKEN_EXPIRE_MINUTES` (ten years).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365 * 10;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub bind_addr: String,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

/// Token signing settings
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    pub secret: String,
    pub ttl_minutes: i64,
}

impl core::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl Settings {
    /// Load settings from the environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = match lookup("SECRET_KEY") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("SECRET_KEY not set; using insecure default signing secret");
                INSECURE_DEFAULT_SECRET.to_string()
            }
        };

        let ttl_minutes = parse_or(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 30_i64)?;
        if !(0..=MAX_TOKEN_TTL_MINUTES).contains(&ttl_minutes) {
            anyhow::bail!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be between 0 and {MAX_TOKEN_TTL_MINUTES}, got {ttl_minutes}"
            );
        }

        Ok(Settings {
            server: ServerSettings {
                bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            },
            database: DatabaseSettings {
                url: lookup("DATABASE_URL")
                    .unwrap_or_else(|| "sqlite://scribe.db?mode=rwc".to_string()),
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5_u32)?,
            },
            jwt: JwtSettings {
                secret,
                ttl_minutes,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: core::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
