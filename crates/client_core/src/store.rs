use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::{
    account_service::AccountService,
    id::IdGenerator,
    user::{reduce, UserAction, UserState},
};

const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Snapshot of the application tree as seen by orchestrators.
#[derive(Clone)]
pub struct StateTree {
    pub user: Arc<UserState>,
    pub api: Arc<dyn AccountService>,
}

/// Dispatch/read access to the store that owns the user state.
///
/// Implementations must apply dispatches one at a time, each against the
/// state committed by the previous one.
#[async_trait]
pub trait StoreBridge: Send + Sync {
    async fn dispatch(&self, action: UserAction);
    async fn get_state(&self) -> StateTree;
}

#[derive(Debug, Clone)]
pub enum StoreEvent {
    Committed {
        action: UserAction,
        state: Arc<UserState>,
    },
}

pub struct UserStore {
    api: Arc<dyn AccountService>,
    user: Mutex<Arc<UserState>>,
    events: broadcast::Sender<StoreEvent>,
}

impl UserStore {
    pub fn new(api: Arc<dyn AccountService>, ids: &dyn IdGenerator) -> Arc<Self> {
        Self::with_event_capacity(api, ids, DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_event_capacity(
        api: Arc<dyn AccountService>,
        ids: &dyn IdGenerator,
        capacity: usize,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(capacity.max(1));
        let initial = UserState::initial(ids);
        debug!(user_id = %initial.user_id, "user: store initialized");
        Arc::new(Self {
            api,
            user: Mutex::new(Arc::new(initial)),
            events,
        })
    }

    pub async fn user_state(&self) -> Arc<UserState> {
        Arc::clone(&*self.user.lock().await)
    }

    /// Receives one event per committed dispatch, in commit order.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl StoreBridge for UserStore {
    async fn dispatch(&self, action: UserAction) {
        let mut current = self.user.lock().await;
        let next = reduce(&current, &action);
        *current = Arc::clone(&next);
        debug!(action = action.kind(), "user: committed dispatch");
        // Published under the lock so subscribers see commit order.
        let _ = self.events.send(StoreEvent::Committed {
            action,
            state: next,
        });
    }

    async fn get_state(&self) -> StateTree {
        StateTree {
            user: self.user_state().await,
            api: Arc::clone(&self.api),
        }
    }
}
