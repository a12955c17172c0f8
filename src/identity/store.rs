//! # Identity Store
//!
//! Holds the catalog and the currently selected identity. The selection is
//! written to the `client_settings` table on every change and read back when
//! the store is opened.

use super::{Identity, IdentityCatalog};
use crate::db::settings;
use crate::error::{AppResult, ValidationError};
use sqlx::SqlitePool;

/// Settings key holding the JSON-encoded selected identity
pub const SELECTED_IDENTITY_KEY: &str = "selected_identity";

pub struct IdentityStore {
    pool: SqlitePool,
    catalog: IdentityCatalog,
    selected: Option<Identity>,
}

impl IdentityStore {
    /// Open the store and restore the persisted selection
    ///
    /// Never fails: an absent, unreadable or malformed persisted value leaves
    /// the store with no selection.
    pub async fn open(pool: SqlitePool, catalog: IdentityCatalog) -> Self {
        let selected = match settings::get_setting(&pool, SELECTED_IDENTITY_KEY).await {
            Ok(Some(setting)) => match serde_json::from_str::<Identity>(&setting.value) {
                Ok(identity) => {
                    tracing::debug!("Restored selected identity {}", identity.public_guid);
                    Some(identity)
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed persisted identity: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Could not read persisted identity: {}", e);
                None
            }
        };

        Self {
            pool,
            catalog,
            selected,
        }
    }

    /// The current selection, by value
    pub fn selected(&self) -> Option<Identity> {
        self.selected.clone()
    }

    pub fn catalog(&self) -> &IdentityCatalog {
        &self.catalog
    }

    /// Select an identity and persist it, replacing any previous selection
    pub async fn select(&mut self, identity: Identity) -> AppResult<()> {
        let value = serde_json::to_string(&identity)?;
        settings::put_setting(&self.pool, SELECTED_IDENTITY_KEY, value).await?;

        tracing::info!(
            "Selected identity {} ({})",
            identity.public_guid,
            identity.username
        );
        self.selected = Some(identity);
        Ok(())
    }

    /// Select a catalog entry by its public identifier
    pub async fn select_by_guid(&mut self, public_guid: &str) -> AppResult<Identity> {
        let identity = self
            .catalog
            .find(public_guid)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownIdentity(public_guid.to_string()))?;

        self.select(identity.clone()).await?;
        Ok(identity)
    }

    /// Drop the selection and erase the persisted value (logout)
    pub async fn clear(&mut self) -> AppResult<()> {
        settings::delete_setting(&self.pool, SELECTED_IDENTITY_KEY).await?;
        self.selected = None;
        tracing::info!("Cleared selected identity");
        Ok(())
    }
}
