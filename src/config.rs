//! # Configuration Management
//!
//! Configuration comes from the environment (12-factor style), with an
//! optional `.env` file for local development.
//!
//! ## Environment Variables
//! - `RP_BASE_URL`: Relying party base URL (default: http://localhost:8080)
//! - `DATABASE_URL`: SQLite database holding the selected identity
//! - `IDENTITY_CATALOG`: Path to a JSON array of `{ publicGuid, username }`
//! - `AUTHENTICATOR_COMMAND`: Helper program bridging to the platform authenticator

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use url::Url;

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the relying party
    /// The ceremony endpoints (`/registration/start`, ...) are resolved against it
    pub rp_base_url: Url,

    /// SQLite connection URL for the local store
    /// The "mode=rwc" means: read, write, create if not exists
    pub database_url: String,

    /// Optional path to the identity catalog
    /// When unset, the built-in default identity is used
    pub identity_catalog: Option<PathBuf>,

    /// Optional authenticator helper: program followed by leading arguments
    pub authenticator_command: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails only when `RP_BASE_URL` is not a valid URL.
    ///
    /// ## Example .env file
    /// ```text
    /// RP_BASE_URL=http://localhost:8080
    /// DATABASE_URL=sqlite:passkey-client.db?mode=rwc
    /// IDENTITY_CATALOG=identities.json
    /// AUTHENTICATOR_COMMAND=passkey-helper --platform
    /// ```
    pub fn from_env() -> Result<Self> {
        // dotenvy doesn't error if the file is missing
        dotenvy::dotenv().ok();

        let base_url =
            env::var("RP_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        Ok(Config {
            rp_base_url: parse_base_url(&base_url)?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:passkey-client.db?mode=rwc".to_string()),

            identity_catalog: env::var_os("IDENTITY_CATALOG").map(PathBuf::from),

            authenticator_command: env::var("AUTHENTICATOR_COMMAND")
                .ok()
                .and_then(|raw| split_command(&raw)),
        })
    }
}

/// Parse the relying party URL, normalising it to end with a slash so that
/// endpoint paths join below it instead of replacing its last segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalised = raw.trim().to_string();
    if !normalised.ends_with('/') {
        normalised.push('/');
    }
    Url::parse(&normalised).with_context(|| format!("Invalid RP_BASE_URL '{}'", raw))
}

fn split_command(raw: &str) -> Option<Vec<String>> {
    let parts: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}
