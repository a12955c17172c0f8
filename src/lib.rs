//! # Passkey Client
//!
//! Client side of passkey (WebAuthn) registration and authentication against
//! a remote relying party, with a local platform authenticator as the trust
//! anchor.
//!
//! ## Key Concepts
//! - **Ceremony**: one start → authenticator → finish exchange
//! - **Correlation token**: `registrationId` / `assertionId`, issued by the
//!   start call and echoed back exactly once by the finish call
//! - **Selected identity**: who a registration is for; survives restarts

pub mod ceremony;     // State machine sequencing the three steps
pub mod config;       // Configuration from environment variables
pub mod db;           // Local SQLite store
pub mod error;        // Error taxonomy
pub mod handlers;     // CLI command handlers
pub mod identity;     // Identity catalog and selection
pub mod state;        // Shared application state
pub mod webauthn;     // Relying party calls and the authenticator boundary

pub use ceremony::{CeremonyController, CeremonyState, CeremonyStatus};
pub use error::{AppError, AppResult, ProtocolError, ValidationError};
pub use identity::{Identity, IdentityCatalog, IdentityStore};
