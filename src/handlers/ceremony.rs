use crate::ceremony::{CeremonyState, CeremonyStatus};
use crate::error::AppResult;
use crate::state::AppState;
use crate::webauthn::CeremonyKind;

/// Run one ceremony, printing each status line as the controller emits it
pub async fn run_ceremony(state: &AppState, kind: CeremonyKind) -> AppResult<()> {
    let store = state.identity_store().await;
    let mut controller = state.controller(kind);

    let mut events = controller.events();
    let printer = tokio::spawn(async move {
        while let Some(snapshot) = events.recv().await {
            if snapshot.status != CeremonyStatus::Idle {
                print_state(&snapshot);
            }
        }
    });

    let outcome = controller.start(&store).await;

    // Dropping the controller ends the event stream once it is drained
    drop(controller);
    if let Err(e) = printer.await {
        tracing::warn!("Status printer stopped early: {}", e);
    }

    outcome.map(|_| ())
}

fn print_state(state: &CeremonyState) {
    println!("{}", state.status_text);
    if let Some(error) = &state.error_message {
        println!("Error: {}", error);
    }
}
