//! # Identities
//!
//! The identities a ceremony can be tied to, and which one is selected.
//!
//! - `Identity` and `IdentityCatalog` are read-only inputs supplied from outside
//! - `store::IdentityStore` owns the selection and persists it across restarts

pub mod store;

pub use store::IdentityStore;

use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A user identity known to the relying party
///
/// ## Example JSON
/// ```json
/// { "publicGuid": "guidguid1111", "username": "alice" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Public identifier sent to the server when registering
    pub public_guid: String,
    pub username: String,
}

impl Identity {
    pub fn new(public_guid: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            public_guid: public_guid.into(),
            username: username.into(),
        }
    }
}

/// Read-only list of identities the user can pick from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityCatalog {
    identities: Vec<Identity>,
}

impl IdentityCatalog {
    pub fn new(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    /// Load a catalog from a JSON array on disk
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> AppResult<Self> {
        let identities: Vec<Identity> = serde_json::from_str(content)?;
        Ok(Self::new(identities))
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn find(&self, public_guid: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.public_guid == public_guid)
    }
}

impl Default for IdentityCatalog {
    /// The single identity used when no catalog file is configured
    fn default() -> Self {
        Self::new(vec![Identity::new("guidguid1111", "default")])
    }
}
