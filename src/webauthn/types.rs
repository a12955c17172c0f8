//! # WebAuthn Ceremony Types
//!
//! The values flowing through a ceremony and the JSON payloads exchanged with
//! the relying party.
//!
//! ## API Flow
//! Each ceremony has two server calls: start and finish
//! - Start: client asks for options, server returns a challenge and a token
//! - Finish: client sends the signed credential plus the same token back
//!
//! ## Double encoding
//! The options and the credential travel as JSON *strings* inside the JSON
//! body, so they are encoded (or decoded) twice.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Which ceremony is being run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CeremonyKind {
    Registration,
    Authentication,
}

impl CeremonyKind {
    /// Start endpoint, relative to the relying party base URL
    pub fn start_path(self) -> &'static str {
        match self {
            CeremonyKind::Registration => "registration/start",
            CeremonyKind::Authentication => "authenticate/start",
        }
    }

    /// Finish endpoint, relative to the relying party base URL
    pub fn finish_path(self) -> &'static str {
        match self {
            CeremonyKind::Registration => "registration/finish",
            CeremonyKind::Authentication => "authenticate/finish",
        }
    }

    pub(crate) fn start_failure(self) -> &'static str {
        match self {
            CeremonyKind::Registration => "Failed to fetch credential creation options",
            CeremonyKind::Authentication => "Failed to fetch credential request options",
        }
    }

    pub(crate) fn finish_failure(self) -> &'static str {
        match self {
            CeremonyKind::Registration => "Failed to complete registration",
            CeremonyKind::Authentication => "Failed to complete authentication",
        }
    }

    pub(crate) fn default_success(self) -> &'static str {
        match self {
            CeremonyKind::Registration => "Registration completed successfully!",
            CeremonyKind::Authentication => "Authentication completed successfully!",
        }
    }
}

impl fmt::Display for CeremonyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CeremonyKind::Registration => f.write_str("registration"),
            CeremonyKind::Authentication => f.write_str("authentication"),
        }
    }
}

/// Server-issued ceremony parameters (challenge and constraints)
///
/// Opaque to the client: it must reach the authenticator exactly as the
/// server sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct CeremonyOptions(Value);

impl CeremonyOptions {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Decode the inner JSON string of a start response
    pub fn decode(encoded: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(encoded).map(Self)
    }

    /// Encode back into the string form used on the wire
    pub fn encode(&self) -> String {
        self.0.to_string()
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

/// Correlation identifier (`registrationId` / `assertionId`)
///
/// Deliberately neither `Clone` nor `Copy`: submitting a result consumes the
/// token, so the same token cannot be echoed to the server twice.
#[derive(Debug, PartialEq, Eq)]
pub struct CeremonyToken(String);

impl CeremonyToken {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn into_inner(self) -> String {
        self.0
    }
}

/// The authenticator's signed output (public key credential)
#[derive(Debug, Clone, PartialEq)]
pub struct CeremonyResult(Value);

impl CeremonyResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

// Wire payloads

/// Body of `POST /registration/start`
///
/// ## Example JSON
/// ```json
/// { "publicGuid": "guidguid1111" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStartRequest {
    pub public_guid: String,
}

/// Body of `POST /authenticate/start`, always `{}`
///
/// The identity is resolved by the authenticator and the server.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuthenticationStartRequest {}

/// Body of a 2xx `/registration/start` response
///
/// Fields are optional here so that a missing key becomes a
/// `ProtocolError::MissingField` instead of a generic parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStartResponse {
    pub public_key_credential_creation_options: Option<String>,
    pub registration_id: Option<String>,
}

/// Body of a 2xx `/authenticate/start` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationStartResponse {
    pub credential_json: Option<String>,
    pub assertion_id: Option<String>,
}

/// Body of `POST /registration/finish`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFinishRequest {
    pub registration_id: String,
    /// The credential, serialized to a JSON string
    pub public_key_credential_string: String,
}

/// Body of `POST /authenticate/finish`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationFinishRequest {
    pub assertion_id: String,
    /// The assertion, serialized to a JSON string
    pub public_key_credential_json: String,
}

/// Body of either finish response, success or failure
#[derive(Debug, Default, Deserialize)]
pub struct FinishResponse {
    pub message: Option<String>,
}

/// A start response that carries double-encoded options and a token
pub trait StartResponse {
    const OPTIONS_FIELD: &'static str;
    const TOKEN_FIELD: &'static str;

    fn into_fields(self) -> (Option<String>, Option<String>);

    /// Validate both fields and decode the options string
    fn into_parts(self) -> Result<(CeremonyOptions, CeremonyToken), ProtocolError>
    where
        Self: Sized,
    {
        let (options, token) = self.into_fields();
        let options = require(options, Self::OPTIONS_FIELD)?;
        let token = require(token, Self::TOKEN_FIELD)?;

        let options =
            CeremonyOptions::decode(&options).map_err(|e| ProtocolError::MalformedField {
                field: Self::OPTIONS_FIELD,
                reason: e.to_string(),
            })?;

        Ok((options, CeremonyToken::new(token)))
    }
}

impl StartResponse for RegistrationStartResponse {
    const OPTIONS_FIELD: &'static str = "publicKeyCredentialCreationOptions";
    const TOKEN_FIELD: &'static str = "registrationId";

    fn into_fields(self) -> (Option<String>, Option<String>) {
        (self.public_key_credential_creation_options, self.registration_id)
    }
}

impl StartResponse for AuthenticationStartResponse {
    const OPTIONS_FIELD: &'static str = "credentialJson";
    const TOKEN_FIELD: &'static str = "assertionId";

    fn into_fields(self) -> (Option<String>, Option<String>) {
        (self.credential_json, self.assertion_id)
    }
}

// Absent, null and empty all count as missing
fn require(value: Option<String>, field: &'static str) -> Result<String, ProtocolError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ProtocolError::MissingField(field))
}
