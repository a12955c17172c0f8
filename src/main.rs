//! # Passkey Client CLI
//!
//! Registers and authenticates passkeys against a WebAuthn relying party.
//!
//! ```text
//! passkey-client identities
//! passkey-client select guidguid1111
//! passkey-client register
//! passkey-client authenticate
//! passkey-client logout
//! ```

use clap::{Parser, Subcommand};
use passkey_client::config::Config;
use passkey_client::handlers::{ceremony, identity};
use passkey_client::state::AppState;
use passkey_client::webauthn::CeremonyKind;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "passkey-client")]
#[command(about = "Register and authenticate passkeys against a WebAuthn relying party", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known identities (the selected one is marked with *)
    Identities,

    /// Select the identity to register passkeys for
    Select {
        /// Public identifier of a catalog identity
        public_guid: String,
    },

    /// Show the selected identity
    Whoami,

    /// Forget the selected identity
    Logout,

    /// Register a new passkey for the selected identity
    Register,

    /// Authenticate with an existing passkey
    Authenticate,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout is reserved for command output.
    // Can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,passkey_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    tracing::debug!("Configuration loaded: {:?}", config);

    let state = AppState::new(&config).await?;

    let is_ceremony = matches!(cli.command, Commands::Register | Commands::Authenticate);

    let outcome = match cli.command {
        Commands::Identities => identity::list_identities(&state).await,
        Commands::Select { public_guid } => identity::select_identity(&state, &public_guid).await,
        Commands::Whoami => identity::whoami(&state).await,
        Commands::Logout => identity::logout(&state).await,
        Commands::Register => ceremony::run_ceremony(&state, CeremonyKind::Registration).await,
        Commands::Authenticate => {
            ceremony::run_ceremony(&state, CeremonyKind::Authentication).await
        }
    };

    Ok(match outcome {
        Ok(()) => ExitCode::SUCCESS,
        // Ceremony failures were already printed with their status line
        Err(_) if is_ceremony => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    })
}
