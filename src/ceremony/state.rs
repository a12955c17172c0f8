//! # Ceremony State
//!
//! An immutable snapshot of one ceremony. Each transition consumes the
//! current snapshot and returns the next one; only the controller drives
//! them.
//!
//! ```text
//! Idle -> FetchingOptions -> AwaitingAuthenticator -> SubmittingResult -> Completed
//!              |                     |                       |
//!              +---------------------+-----------------------+--> Failed
//! ```

use crate::error::AppError;
use crate::webauthn::{CeremonyKind, CeremonyToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyStatus {
    Idle,
    FetchingOptions,
    AwaitingAuthenticator,
    SubmittingResult,
    Completed,
    Failed,
}

impl CeremonyStatus {
    /// `Completed` and `Failed` stay put until the next start
    pub fn is_terminal(self) -> bool {
        matches!(self, CeremonyStatus::Completed | CeremonyStatus::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CeremonyState {
    pub kind: CeremonyKind,
    pub status: CeremonyStatus,
    /// Correlation id of the in-flight ceremony, once the server issued one
    pub token: Option<String>,
    /// Text suitable for display, reflecting the last attempted step
    pub status_text: String,
    pub error_message: Option<String>,
}

impl CeremonyState {
    pub fn idle(kind: CeremonyKind) -> Self {
        Self {
            kind,
            status: CeremonyStatus::Idle,
            token: None,
            status_text: String::new(),
            error_message: None,
        }
    }

    /// Begin a new attempt, discarding whatever the previous one left behind
    pub fn start(self) -> Self {
        let kind = self.kind;
        Self {
            status: CeremonyStatus::FetchingOptions,
            status_text: match kind {
                CeremonyKind::Registration => "Starting registration...",
                CeremonyKind::Authentication => "Starting authentication...",
            }
            .to_string(),
            ..Self::idle(kind)
        }
    }

    pub fn options_received(self, token: &CeremonyToken) -> Self {
        debug_assert_eq!(self.status, CeremonyStatus::FetchingOptions);
        Self {
            status: CeremonyStatus::AwaitingAuthenticator,
            token: Some(token.as_str().to_string()),
            status_text: match self.kind {
                CeremonyKind::Registration => "Creating credentials...",
                CeremonyKind::Authentication => "Performing WebAuthn ceremony...",
            }
            .to_string(),
            ..self
        }
    }

    pub fn credential_created(self) -> Self {
        debug_assert_eq!(self.status, CeremonyStatus::AwaitingAuthenticator);
        Self {
            status: CeremonyStatus::SubmittingResult,
            status_text: match self.kind {
                CeremonyKind::Registration => "Finishing registration...",
                CeremonyKind::Authentication => "Sending response to server...",
            }
            .to_string(),
            ..self
        }
    }

    /// The server accepted the result; `message` is what it said
    pub fn complete(self, message: String) -> Self {
        debug_assert_eq!(self.status, CeremonyStatus::SubmittingResult);
        Self {
            status: CeremonyStatus::Completed,
            status_text: message,
            ..self
        }
    }

    /// Any step failed; keeps the token so the failed attempt stays traceable
    pub fn fail(self, error: &AppError) -> Self {
        debug_assert!(!self.status.is_terminal());
        Self {
            status: CeremonyStatus::Failed,
            status_text: match self.kind {
                CeremonyKind::Registration => "Registration failed",
                CeremonyKind::Authentication => "Authentication failed",
            }
            .to_string(),
            error_message: Some(error.user_message()),
            ..self
        }
    }
}
