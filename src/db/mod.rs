//! # Database Module
//!
//! The client keeps a small SQLite database for state that must survive a
//! restart. Today that is only the selected identity.
//!
//! - `models`: Row types
//! - `settings`: Key/value operations on the `client_settings` table

pub mod models;
pub mod settings;

use crate::error::AppResult;
use sqlx::sqlite::SqlitePool;

/// Connect to the local store and bring its schema up to date
///
/// The `sqlx::migrate!` macro embeds the files from `./migrations`.
pub async fn connect(database_url: &str) -> AppResult<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::debug!("Local store ready at {}", database_url);
    Ok(pool)
}
