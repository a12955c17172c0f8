//! # Result Submitter
//!
//! Step 3 of a ceremony: hand the authenticator's output to the relying
//! party together with the token from step 1.

use super::client::RelyingParty;
use super::types::{
    AuthenticationFinishRequest, CeremonyKind, CeremonyResult, CeremonyToken, FinishResponse,
    RegistrationFinishRequest,
};
use crate::error::{AppError, AppResult, ProtocolError};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct ResultSubmitter {
    relying_party: RelyingParty,
}

impl ResultSubmitter {
    pub fn new(relying_party: RelyingParty) -> Self {
        Self { relying_party }
    }

    /// Submit the signed credential and return the server's status message
    ///
    /// The token is consumed whatever the outcome.
    ///
    /// ## Errors
    /// - Network: transport failure, or a 2xx body that is not JSON
    /// - Protocol: a 2xx JSON body whose `message` is not a string
    /// - ServerRejection: non-2xx, with the server's `message` when it sent one
    pub async fn submit(
        &self,
        kind: CeremonyKind,
        token: CeremonyToken,
        result: &CeremonyResult,
    ) -> AppResult<String> {
        let credential = result.to_json_string();
        let context = kind.finish_failure();

        let response = match kind {
            CeremonyKind::Registration => {
                let request = RegistrationFinishRequest {
                    registration_id: token.into_inner(),
                    public_key_credential_string: credential,
                };
                self.relying_party
                    .post_json(kind.finish_path(), &request, context)
                    .await?
            }
            CeremonyKind::Authentication => {
                let request = AuthenticationFinishRequest {
                    assertion_id: token.into_inner(),
                    public_key_credential_json: credential,
                };
                self.relying_party
                    .post_json(kind.finish_path(), &request, context)
                    .await?
            }
        };

        if !response.status.is_success() {
            let message = serde_json::from_str::<FinishResponse>(&response.body)
                .ok()
                .and_then(|r| r.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| context.to_string());

            tracing::warn!(
                "Relying party rejected {} (HTTP {}): {}",
                kind,
                response.status.as_u16(),
                message
            );
            return Err(AppError::ServerRejection(message));
        }

        if response.body.trim().is_empty() {
            return Ok(kind.default_success().to_string());
        }

        let body: Value = serde_json::from_str(&response.body).map_err(|e| {
            AppError::Network(format!("{}: response is not valid JSON: {}", context, e))
        })?;
        let finish: FinishResponse = serde_json::from_value(body)
            .map_err(|e| ProtocolError::MalformedBody(e.to_string()))?;

        Ok(finish
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| kind.default_success().to_string()))
    }
}
