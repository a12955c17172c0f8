//! # Application State
//!
//! Everything the CLI handlers share, built once at startup:
//! 1. The SQLite pool backing the identity store
//! 2. The relying party HTTP client
//! 3. The authenticator bridge
//! 4. The identity catalog
//!
//! `AppState` is cheap to clone: the pool, the HTTP client and the
//! authenticator are all reference counted.

use crate::config::Config;
use crate::ceremony::CeremonyController;
use crate::db;
use crate::identity::{IdentityCatalog, IdentityStore};
use crate::webauthn::{
    Authenticator, CeremonyKind, CommandAuthenticator, RelyingParty, UnconfiguredAuthenticator,
};
use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub relying_party: RelyingParty,
    pub authenticator: Arc<dyn Authenticator>,
    pub catalog: IdentityCatalog,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Errors
    /// Returns an error if:
    /// - The local database cannot be opened or migrated
    /// - The identity catalog file cannot be read or parsed
    /// - The HTTP client cannot be built
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::connect(&config.database_url)
            .await
            .with_context(|| format!("Opening local store {}", config.database_url))?;

        let catalog = match &config.identity_catalog {
            Some(path) => IdentityCatalog::from_path(path)
                .with_context(|| format!("Loading identity catalog {}", path.display()))?,
            None => IdentityCatalog::default(),
        };

        let relying_party = RelyingParty::new(config.rp_base_url.clone())?;

        let authenticator: Arc<dyn Authenticator> = match config
            .authenticator_command
            .clone()
            .and_then(CommandAuthenticator::from_command_line)
        {
            Some(command) => Arc::new(command),
            None => {
                tracing::warn!("AUTHENTICATOR_COMMAND not set; ceremonies will fail at the authenticator step");
                Arc::new(UnconfiguredAuthenticator)
            }
        };

        Ok(AppState {
            db,
            relying_party,
            authenticator,
            catalog,
        })
    }

    /// Open the identity store, restoring the persisted selection
    pub async fn identity_store(&self) -> IdentityStore {
        IdentityStore::open(self.db.clone(), self.catalog.clone()).await
    }

    pub fn controller(&self, kind: CeremonyKind) -> CeremonyController {
        CeremonyController::new(kind, self.relying_party.clone(), self.authenticator.clone())
    }
}
