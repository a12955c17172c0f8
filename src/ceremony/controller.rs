//! # Ceremony Controller
//!
//! Sequences options fetch → authenticator → submission for one ceremony
//! kind. Every state change is published twice:
//! - on a `watch` channel, for readers that only need the latest snapshot
//! - on unbounded `mpsc` event streams, which deliver every transition in order

use super::state::CeremonyState;
use crate::error::{AppResult, ValidationError};
use crate::identity::{Identity, IdentityStore};
use crate::webauthn::{
    Authenticator, CeremonyExecutor, CeremonyKind, OptionsFetcher, RelyingParty, ResultSubmitter,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::Instrument;
use uuid::Uuid;

pub struct CeremonyController {
    kind: CeremonyKind,
    fetcher: OptionsFetcher,
    executor: CeremonyExecutor,
    submitter: ResultSubmitter,
    state: watch::Sender<CeremonyState>,
    events: Vec<mpsc::UnboundedSender<CeremonyState>>,
}

impl CeremonyController {
    pub fn new(
        kind: CeremonyKind,
        relying_party: RelyingParty,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let (state, _) = watch::channel(CeremonyState::idle(kind));

        Self {
            kind,
            fetcher: OptionsFetcher::new(relying_party.clone()),
            executor: CeremonyExecutor::new(authenticator),
            submitter: ResultSubmitter::new(relying_party),
            state,
            events: Vec::new(),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> CeremonyState {
        self.state.borrow().clone()
    }

    /// Follow state changes; the receiver sees the latest snapshot only
    pub fn subscribe(&self) -> watch::Receiver<CeremonyState> {
        self.state.subscribe()
    }

    /// Every transition from now on, in order
    ///
    /// The stream ends when the controller is dropped.
    pub fn events(&mut self) -> mpsc::UnboundedReceiver<CeremonyState> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events.push(tx);
        rx
    }

    /// Back to Idle
    ///
    /// Whoever clears the selected identity (logout) calls this on any
    /// controller that outlives the logout.
    pub fn reset(&mut self) {
        let kind = self.kind;
        self.transition(|_| CeremonyState::idle(kind));
    }

    /// Run one full ceremony attempt
    ///
    /// The selected identity is read once, up front. Registration without a
    /// selection fails before any request is sent. Whatever happens, the
    /// final state (Completed or Failed) is left on the controller; the
    /// return value mirrors it for callers that prefer a `Result`.
    pub async fn start(&mut self, identities: &IdentityStore) -> AppResult<String> {
        let attempt = Uuid::new_v4();
        let span = tracing::info_span!("ceremony", kind = %self.kind, %attempt);

        async {
            self.transition(CeremonyState::start);
            tracing::info!("Starting {}", self.kind);

            match self.run(identities.selected()).await {
                Ok(message) => {
                    tracing::info!("{} completed: {}", self.kind, message);
                    self.transition(|state| state.complete(message.clone()));
                    Ok(message)
                }
                Err(e) => {
                    tracing::error!("{} failed: {}", self.kind, e);
                    self.transition(|state| state.fail(&e));
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, selected: Option<Identity>) -> AppResult<String> {
        if self.kind == CeremonyKind::Registration && selected.is_none() {
            return Err(ValidationError::NoIdentitySelected.into());
        }

        let (options, token) = self
            .fetcher
            .fetch_options(self.kind, selected.as_ref())
            .await?;
        self.transition(|state| state.options_received(&token));

        let result = self.executor.execute(self.kind, &options).await?;
        self.transition(CeremonyState::credential_created);

        self.submitter.submit(self.kind, token, &result).await
    }

    fn transition(&self, next: impl FnOnce(CeremonyState) -> CeremonyState) {
        let kind = self.kind;
        self.state.send_modify(|state| {
            let current = std::mem::replace(state, CeremonyState::idle(kind));
            *state = next(current);
            tracing::debug!(status = ?state.status, "{}", state.status_text);
        });

        let snapshot = self.state.borrow().clone();
        for events in &self.events {
            // A closed receiver only means nobody is listening any more
            let _ = events.send(snapshot.clone());
        }
    }
}
