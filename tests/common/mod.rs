//! Shared fixtures: an in-process relying party and a scripted authenticator.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::routing::post;
use axum::{Json, Router};
use passkey_client::identity::{IdentityCatalog, IdentityStore};
use passkey_client::webauthn::{
    Authenticator, AuthenticatorError, CeremonyOptions, CeremonyResult, RelyingParty,
};
use passkey_client::Identity;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use url::Url;

/// Relying party double: answers each endpoint with a canned response and
/// records every request body it receives.
#[derive(Clone, Default)]
pub struct MockRelyingParty {
    responses: Arc<Mutex<HashMap<String, (StatusCode, String)>>>,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockRelyingParty {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, status: StatusCode, body: Value) -> Self {
        self.respond_raw(path, status, &body.to_string())
    }

    pub fn respond_raw(self, path: &str, status: StatusCode, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    /// Every request received so far, as (path, JSON body)
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body)
            .collect()
    }

    /// Serve on an ephemeral port and return a client pointed at it
    pub async fn spawn(&self) -> RelyingParty {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/registration/start", post(answer))
            .route("/registration/finish", post(answer))
            .route("/authenticate/start", post(answer))
            .route("/authenticate/finish", post(answer))
            .with_state(self.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base: Url = format!("http://{}/", addr).parse().unwrap();
        RelyingParty::new(base).unwrap()
    }
}

async fn answer(
    State(mock): State<MockRelyingParty>,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let path = uri.path().to_string();
    mock.requests.lock().unwrap().push((path.clone(), body));

    let (status, body) = mock
        .responses
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, String::new()));

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// A client whose server is gone: every request fails at the transport
pub async fn unreachable_relying_party() -> RelyingParty {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    RelyingParty::new(format!("http://{}/", addr).parse().unwrap()).unwrap()
}

/// Authenticator double returning a fixed outcome and counting invocations
pub struct FakeAuthenticator {
    outcome: Result<Value, String>,
    calls: AtomicUsize,
    seen_options: Mutex<Vec<(&'static str, Value)>>,
}

impl FakeAuthenticator {
    pub fn succeeding(credential: Value) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(credential),
            calls: AtomicUsize::new(0),
            seen_options: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
            seen_options: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (operation, options) for every invocation
    pub fn seen_options(&self) -> Vec<(&'static str, Value)> {
        self.seen_options.lock().unwrap().clone()
    }

    fn invoke(
        &self,
        operation: &'static str,
        options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_options
            .lock()
            .unwrap()
            .push((operation, options.as_json().clone()));

        match &self.outcome {
            Ok(credential) => Ok(CeremonyResult::new(credential.clone())),
            Err(reason) => Err(AuthenticatorError(reason.clone())),
        }
    }
}

#[async_trait]
impl Authenticator for FakeAuthenticator {
    async fn create_credential(
        &self,
        options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError> {
        self.invoke("create", options)
    }

    async fn get_credential_assertion(
        &self,
        options: &CeremonyOptions,
    ) -> Result<CeremonyResult, AuthenticatorError> {
        self.invoke("get", options)
    }
}

/// A file-backed local store in a temporary directory
pub struct TestStore {
    pub dir: TempDir,
    pub database_url: String,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let database_url = format!("sqlite:{}?mode=rwc", dir.path().join("client.db").display());
        Self { dir, database_url }
    }

    pub async fn open(&self) -> IdentityStore {
        let pool = passkey_client::db::connect(&self.database_url).await.unwrap();
        IdentityStore::open(pool, catalog()).await
    }
}

pub fn catalog() -> IdentityCatalog {
    IdentityCatalog::new(vec![
        Identity::new("g1", "alice"),
        Identity::new("g2", "bob"),
    ])
}
