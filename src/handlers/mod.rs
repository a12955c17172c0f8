//! # Command Handlers
//!
//! One function per CLI subcommand. Each handler:
//! 1. Takes the shared `AppState`
//! 2. Calls into the identity store or a ceremony controller
//! 3. Prints the outcome for the user
//!
//! ## Submodules
//! - `identity`: List, select, show and clear the selected identity
//! - `ceremony`: Run registration or authentication

pub mod ceremony;
pub mod identity;
