//! phishguard-app - Application state and orchestration for PhishGuard
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the Engine that runs actions against a [`Backend`], the
//! local stores, configuration loading, and the workflows shared with the
//! command line.
//!
//! [`Backend`]: phishguard_client::Backend

pub mod actions;
pub mod config;
pub mod confirm_dialog;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod navigation;
pub mod process;
pub mod state;
pub mod store;
pub mod text_field;
pub mod workflow;

// Re-export primary types
pub use engine::{Engine, EnginePaths};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{Message, RequestError, RequestId, RequestResult};
pub use navigation::{navigate, NavAction, View};
pub use state::AppState;
pub use store::{HistoryRecorder, KvStore, SessionStore, Stores};
