//! # Ceremonies
//!
//! - `state`: The `CeremonyState` snapshot and its transitions
//! - `controller`: `CeremonyController`, which runs a ceremony end to end

pub mod controller;
pub mod state;

pub use controller::CeremonyController;
pub use state::{CeremonyState, CeremonyStatus};
