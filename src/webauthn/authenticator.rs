//! # Authenticator Boundary
//!
//! Step 2 of a ceremony: the platform authenticator signs the challenge.
//!
//! The authenticator itself lives outside this crate. `Authenticator` is the
//! capability the ceremony needs from it; `CommandAuthenticator` reaches a real
//! one through a helper program, and tests substitute fakes.
//!
//! ## Helper program contract
//! - invoked as `<program> <args...> create` or `<program> <args...> get`
//! - reads the options JSON on stdin
//! - writes the credential JSON on stdout and exits 0
//! - on failure (cancelled, timed out, no authenticator) exits non-zero with
//!   the reason on stderr

use super::types::{CeremonyKind, CeremonyOptions, CeremonyResult};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Failure reported by the authenticator
///
/// Cancellation, timeouts and hardware errors are not told apart; the reason
/// text is carried as reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct AuthenticatorError(pub String);

/// Platform authenticator capability
///
/// Both calls may wait indefinitely on user interaction.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Create a new credential (registration / attestation)
    async fn create_credential(
        &self,
        options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError>;

    /// Sign a challenge with an existing credential (authentication / assertion)
    async fn get_credential_assertion(
        &self,
        options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError>;
}

/// Runs one authenticator invocation per ceremony attempt
#[derive(Clone)]
pub struct CeremonyExecutor {
    authenticator: Arc<dyn Authenticator>,
}

impl CeremonyExecutor {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Invoke the authenticator for `kind`; never retries
    pub async fn execute(
        &self,
        kind: CeremonyKind,
        options: &CeremonyOptions,
    ) -> AppResult<CeremonyResult> {
        let outcome = match kind {
            CeremonyKind::Registration => self.authenticator.create_credential(options).await,
            CeremonyKind::Authentication => {
                self.authenticator.get_credential_assertion(options).await
            }
        };

        outcome.map_err(|e| AppError::Ceremony(format!("WebAuthn ceremony failed: {}", e)))
    }
}

/// Authenticator bridge backed by an external helper program
#[derive(Debug, Clone)]
pub struct CommandAuthenticator {
    program: String,
    args: Vec<String>,
}

impl CommandAuthenticator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from `program arg...`; `None` when the list is empty
    pub fn from_command_line(mut parts: Vec<String>) -> Option<Self> {
        if parts.is_empty() {
            return None;
        }
        let program = parts.remove(0);
        Some(Self::new(program, parts))
    }

    async fn run(
        &self,
        mode: &str,
        options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError> {
        tracing::debug!("Invoking authenticator helper {} ({})", self.program, mode);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(mode)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AuthenticatorError(format!("could not start {}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A helper may exit without reading its input
            if let Err(e) = stdin.write_all(options.encode().as_bytes()).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(AuthenticatorError(format!(
                        "could not send options to {}: {}",
                        self.program, e
                    )));
                }
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| AuthenticatorError(format!("{} did not complete: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AuthenticatorError(if stderr.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr
            }));
        }

        serde_json::from_slice(&output.stdout)
            .map(CeremonyResult::new)
            .map_err(|e| AuthenticatorError(format!("invalid credential JSON: {}", e)))
    }
}

#[async_trait]
impl Authenticator for CommandAuthenticator {
    async fn create_credential(
        &self,
        options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError> {
        self.run("create", options).await
    }

    async fn get_credential_assertion(
        &self,
        options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError> {
        self.run("get", options).await
    }
}

/// Stand-in used when no helper is configured; every call fails
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredAuthenticator;

#[async_trait]
impl Authenticator for UnconfiguredAuthenticator {
    async fn create_credential(
        &self,
        _options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError> {
        Err(not_configured())
    }

    async fn get_credential_assertion(
        &self,
        _options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError> {
        Err(not_configured())
    }
}

fn not_configured() -> AuthenticatorError {
    AuthenticatorError("no authenticator configured (set AUTHENTICATOR_COMMAND)".to_string())
}
