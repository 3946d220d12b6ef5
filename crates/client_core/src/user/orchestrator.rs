//! Async routines that fold account service results into the user state.
//!
//! Each routine dispatches a "fetching" update, awaits the service, and on
//! success commits everything it learned in a single update. Failures are
//! returned unchanged and nothing further is dispatched, so
//! `is_fetching_account` stays `true` until a later call succeeds.

use std::sync::Arc;

use anyhow::Result;
use futures::future::join;
use shared::domain::UserClient;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{action::UserAction, state::UserPatch};
use crate::store::StoreBridge;

/// Reloads the account and its linked clients.
pub async fn refresh<B>(bridge: &B) -> Result<()>
where
    B: StoreBridge + ?Sized,
{
    let api = bridge.get_state().await.api;
    debug!("user: refresh started");
    bridge.dispatch(UserAction::update(UserPatch::fetching())).await;

    // Both calls run to completion even if one of them fails.
    let (account, user_clients) = join(api.fetch_account(), api.fetch_user_clients()).await;
    let (account, user_clients) = match (account, user_clients) {
        (Ok(account), Ok(user_clients)) => (account, user_clients),
        (Err(err), _) | (_, Err(err)) => {
            warn!("user: refresh failed: {err:#}");
            return Err(err);
        }
    };

    info!(
        client_id = %account.client_id,
        user_clients = user_clients.len(),
        "user: account refreshed"
    );
    bridge
        .dispatch(UserAction::update(
            UserPatch::default()
                .with_account(Some(account))
                .with_user_clients(user_clients)
                .with_is_fetching_account(false),
        ))
        .await;
    Ok(())
}

/// Persists `payload` and stores the record the service hands back.
pub async fn save_account<B>(bridge: &B, payload: UserClient) -> Result<()>
where
    B: StoreBridge + ?Sized,
{
    let api = bridge.get_state().await.api;
    debug!(client_id = %payload.client_id, "user: save account started");
    bridge.dispatch(UserAction::update(UserPatch::fetching())).await;

    let account = match api.save_account(payload).await {
        Ok(account) => account,
        Err(err) => {
            warn!("user: save account failed: {err:#}");
            return Err(err);
        }
    };

    info!(client_id = %account.client_id, "user: account saved");
    bridge
        .dispatch(UserAction::update(
            UserPatch::default()
                .with_account(Some(account))
                .with_is_fetching_account(false),
        ))
        .await;
    Ok(())
}

/// Runs [`refresh`] on its own task. Dropping the handle does not stop it.
pub fn spawn_refresh<B>(bridge: Arc<B>) -> JoinHandle<Result<()>>
where
    B: StoreBridge + ?Sized + 'static,
{
    tokio::spawn(async move { refresh(bridge.as_ref()).await })
}

/// Runs [`save_account`] on its own task. Dropping the handle does not stop it.
pub fn spawn_save_account<B>(bridge: Arc<B>, payload: UserClient) -> JoinHandle<Result<()>>
where
    B: StoreBridge + ?Sized + 'static,
{
    tokio::spawn(async move { save_account(bridge.as_ref(), payload).await })
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
