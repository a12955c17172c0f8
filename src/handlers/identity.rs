use crate::error::AppResult;
use crate::state::AppState;

pub async fn list_identities(state: &AppState) -> AppResult<()> {
    let store = state.identity_store().await;
    let selected = store.selected();

    for identity in store.catalog().identities() {
        let marker = if selected.as_ref() == Some(identity) { "*" } else { " " };
        println!("{} {}  {}", marker, identity.public_guid, identity.username);
    }

    Ok(())
}

pub async fn select_identity(state: &AppState, public_guid: &str) -> AppResult<()> {
    let mut store = state.identity_store().await;
    let identity = store.select_by_guid(public_guid).await?;

    println!("Selected {} ({})", identity.username, identity.public_guid);
    Ok(())
}

pub async fn whoami(state: &AppState) -> AppResult<()> {
    let store = state.identity_store().await;

    match store.selected() {
        Some(identity) => println!("{} ({})", identity.username, identity.public_guid),
        None => println!("No identity selected"),
    }

    Ok(())
}

pub async fn logout(state: &AppState) -> AppResult<()> {
    let mut store = state.identity_store().await;
    store.clear().await?;

    println!("Logged out");
    Ok(())
}
