//! # Database Models
//!
//! Row types for the local store.

use chrono::Utc;

/// One persisted client setting
///
/// `value` is always JSON text; callers decide what it decodes into.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientSetting {
    pub key: String,
    pub value: String,
    /// When the value was last written (RFC3339 timestamp)
    pub updated_at: String,
}

impl ClientSetting {
    pub fn new(key: &str, value: String) -> Self {
        Self {
            key: key.to_string(),
            value,
            updated_at: Utc::now().to_rfc3339(),
        }
    }
}
