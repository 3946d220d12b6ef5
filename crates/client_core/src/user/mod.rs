//! The user account aggregate: state, actions, reducer and orchestrators.

pub mod action;
pub mod orchestrator;
pub mod reducer;
pub mod state;

pub use action::UserAction;
pub use orchestrator::{refresh, save_account, spawn_refresh, spawn_save_account};
pub use reducer::reduce;
pub use state::{UserPatch, UserState};
