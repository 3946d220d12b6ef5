use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, load_settings_file, refresh, save_account, HttpAccountService, StoreBridge,
    UserAction, UserPatch, UserStore, UuidIdGenerator,
};
use shared::domain::UserClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Settings file; defaults to ./client.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the account and linked clients, then print the user state.
    Show,
    /// Edit and save the account.
    Save {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        send_emails: bool,
    },
    /// Record contributions locally.
    Tally {
        #[arg(long, default_value_t = 0)]
        recordings: u32,
        #[arg(long, default_value_t = 0)]
        verifications: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => load_settings_file(path)?,
        None => load_settings(),
    };
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }

    let api = HttpAccountService::from_settings(&settings)
        .with_context(|| format!("invalid account service at {}", settings.api_base_url()))?;
    info!(base_url = %api.base_url(), "account service configured");
    let store = UserStore::with_event_capacity(
        Arc::new(api),
        &UuidIdGenerator,
        settings.event_capacity,
    );

    match cli.command {
        Command::Show => {
            refresh(store.as_ref()).await?;
        }
        Command::Save {
            email,
            username,
            send_emails,
        } => {
            refresh(store.as_ref()).await?;
            let state = store.user_state().await;
            let mut draft = state
                .account
                .clone()
                .unwrap_or_else(|| UserClient::new(state.user_id.clone()));
            draft.email = Some(email.clone());
            if username.is_some() {
                draft.username = username;
            }

            store
                .dispatch(UserAction::update(
                    UserPatch::default()
                        .with_email(Some(email))
                        .with_send_emails(send_emails),
                ))
                .await;
            save_account(store.as_ref(), draft).await?;
        }
        Command::Tally {
            recordings,
            verifications,
        } => {
            for _ in 0..recordings {
                store.dispatch(UserAction::tally_recording()).await;
            }
            for _ in 0..verifications {
                store.dispatch(UserAction::tally_verification()).await;
            }
            info!(recordings, verifications, "tallies recorded");
        }
    }

    let state = store.user_state().await;
    println!("{}", serde_json::to_string_pretty(&*state)?);
    Ok(())
}
