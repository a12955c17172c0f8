//! # Relying Party Client
//!
//! Thin wrapper around `reqwest` shared by the options fetcher and the result
//! submitter. It only knows how to POST JSON and hand back the raw answer;
//! interpreting status codes is left to the callers.

use crate::error::{AppError, AppResult};
use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

/// HTTP access to the relying party
///
/// Cloning is cheap: `reqwest::Client` is reference counted internally.
#[derive(Debug, Clone)]
pub struct RelyingParty {
    base_url: Url,
    http: reqwest::Client,
}

/// Status and body of a relying party response
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RelyingParty {
    /// Build a client for the relying party at `base_url`
    ///
    /// No request timeout is configured: the transport's own defaults apply.
    pub fn new(base_url: Url) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, http })
    }

    /// POST `body` as JSON to `path`
    ///
    /// Fails with `AppError::Network` when the request cannot be sent or the
    /// body cannot be read; `context` prefixes the message.
    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        context: &str,
    ) -> AppResult<RawResponse> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| AppError::Network(format!("{}: invalid endpoint {}: {}", context, path, e)))?;

        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("{}: {}", context, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("{}: {}", context, e)))?;

        tracing::debug!("Relying party answered {} ({} bytes)", status, body.len());

        Ok(RawResponse { status, body })
    }
}
