//! Client-side container for the user account aggregate.
//!
//! State changes only through [`user::reduce`], applied by a [`StoreBridge`]
//! such as [`UserStore`]. The orchestrators in [`user::orchestrator`] talk to
//! an [`AccountService`] and fold its answers back in through dispatch.

pub mod account_service;
pub mod config;
pub mod error;
pub mod id;
pub mod store;
pub mod user;

pub use account_service::{AccountService, HttpAccountService, MissingAccountService};
pub use config::{load_settings, load_settings_file, ClientSettings};
pub use error::AccountServiceError;
pub use id::{IdGenerator, UuidIdGenerator};
pub use store::{StateTree, StoreBridge, StoreEvent, UserStore};
pub use user::{
    refresh, save_account, spawn_refresh, spawn_save_account, UserAction, UserPatch, UserState,
};
