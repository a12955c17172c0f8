//! # WebAuthn Module
//!
//! The three steps of a passkey ceremony, as seen from the client.
//!
//! ## Submodules
//! - `types`: Ceremony values and the request/response payloads
//! - `client`: HTTP access to the relying party
//! - `options`: Step 1, fetching the challenge (`OptionsFetcher`)
//! - `authenticator`: Step 2, signing it (`CeremonyExecutor`)
//! - `submit`: Step 3, returning the credential (`ResultSubmitter`)
//!
//! ## WebAuthn Flow Overview
//!
//! ### Registration (Creating a Passkey)
//! 1. Client sends the selected identity to `/registration/start`
//! 2. Server answers with creation options and a `registrationId`
//! 3. Authenticator creates a credential from the options
//! 4. Client sends the credential and `registrationId` to `/registration/finish`
//!
//! ### Authentication (Logging In)
//! 1. Client calls `/authenticate/start` with an empty body
//! 2. Server answers with request options and an `assertionId`
//! 3. Authenticator signs the challenge with a stored credential
//! 4. Client sends the assertion and `assertionId` to `/authenticate/finish`

pub mod authenticator;
pub mod client;
pub mod options;
pub mod submit;
pub mod types;

pub use authenticator::{
    Authenticator, AuthenticatorError, CeremonyExecutor, CommandAuthenticator,
    UnconfiguredAuthenticator,
};
pub use client::RelyingParty;
pub use options::OptionsFetcher;
pub use submit::ResultSubmitter;
pub use types::{CeremonyKind, CeremonyOptions, CeremonyResult, CeremonyToken};
