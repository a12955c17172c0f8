//! # Options Fetcher
//!
//! Step 1 of a ceremony: ask the relying party for a challenge.
//!
//! ## Flow
//! 1. POST to the kind's start endpoint (`{ publicGuid }` or `{}`)
//! 2. Require a 2xx answer with a JSON body
//! 3. Require both the options string and the correlation token
//! 4. Decode the options string a second time

use super::client::RelyingParty;
use super::types::{
    AuthenticationStartRequest, AuthenticationStartResponse, CeremonyKind, CeremonyOptions,
    CeremonyToken, RegistrationStartRequest, RegistrationStartResponse, StartResponse,
};
use crate::error::{AppError, AppResult, ProtocolError, ValidationError};
use crate::identity::Identity;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct OptionsFetcher {
    relying_party: RelyingParty,
}

impl OptionsFetcher {
    pub fn new(relying_party: RelyingParty) -> Self {
        Self { relying_party }
    }

    /// Fetch ceremony options and the token that must accompany the result
    ///
    /// `identity` is required for registration and ignored for
    /// authentication.
    ///
    /// ## Errors
    /// - Validation: registration without an identity
    /// - Network: transport failure, a 2xx body that is not JSON, or a non-2xx
    ///   whose body is unreadable or carries both fields
    /// - Protocol: missing options/token (any status), or options that do not
    ///   decode
    pub async fn fetch_options(
        &self,
        kind: CeremonyKind,
        identity: Option<&Identity>,
    ) -> AppResult<(CeremonyOptions, CeremonyToken)> {
        let context = kind.start_failure();

        let response = match kind {
            CeremonyKind::Registration => {
                let identity = identity.ok_or(ValidationError::NoIdentitySelected)?;
                let request = RegistrationStartRequest {
                    public_guid: identity.public_guid.clone(),
                };
                self.relying_party
                    .post_json(kind.start_path(), &request, context)
                    .await?
            }
            CeremonyKind::Authentication => {
                self.relying_party
                    .post_json(kind.start_path(), &AuthenticationStartRequest::default(), context)
                    .await?
            }
        };

        let parsed = serde_json::from_str::<Value>(&response.body);

        if !response.status.is_success() {
            // A readable body without the required keys breaks the contract
            // whatever the status
            if let Ok(body) = parsed {
                if let Err(e @ ProtocolError::MissingField(_)) = parse_for(kind, body) {
                    return Err(e.into());
                }
            }
            return Err(AppError::Network(format!(
                "{} (HTTP {})",
                context,
                response.status.as_u16()
            )));
        }

        let body = parsed.map_err(|e| {
            AppError::Network(format!("{}: response is not valid JSON: {}", context, e))
        })?;
        let (options, token) = parse_for(kind, body)?;

        tracing::debug!("Received {} options with token {}", kind, token.as_str());

        Ok((options, token))
    }
}

fn parse_for(
    kind: CeremonyKind,
    body: Value,
) -> Result<(CeremonyOptions, CeremonyToken), ProtocolError> {
    match kind {
        CeremonyKind::Registration => parse_start::<RegistrationStartResponse>(body),
        CeremonyKind::Authentication => parse_start::<AuthenticationStartResponse>(body),
    }
}

fn parse_start<R>(body: Value) -> Result<(CeremonyOptions, CeremonyToken), ProtocolError>
where
    R: StartResponse + DeserializeOwned,
{
    let response: R =
        serde_json::from_value(body).map_err(|e| ProtocolError::MalformedBody(e.to_string()))?;
    response.into_parts()
}
