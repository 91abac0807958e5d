//! # Store crate: client state for Trench Social
//!
//! Plain Rust state and view logic, kept free of UI code so it can be tested
//! without a renderer. The `ui` crate wraps these types in signals.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | [`Session`], [`Tab`] and the [`SessionStore`] trait for the login snapshot |
//! | [`chat`] | [`ChatLog`]: backlog/push folding, reply selection, message composition |
//! | [`feed`] | Like/retruth/comment request bodies and in-place patches |
//! | [`leaderboard`] | Metrics, rank badges, failure accounting |
//! | [`auth_flow`] | Login modal state machine |
//! | [`streams`] | Livestream grid sequencing |
//! | [`profile`], [`dm`], [`report`], [`search`], [`wallet`] | Per-view helpers and messages |
//! | [`toast`] | Toast levels and the live toast list |
//! | [`time`] | Timestamp formatting |
//! | [`config`] | [`AppConfig`] |

pub mod auth_flow;
pub mod chat;
pub mod config;
pub mod dm;
pub mod error;
pub mod feed;
pub mod leaderboard;
pub mod profile;
pub mod report;
pub mod search;
pub mod session;
pub mod streams;
pub mod time;
pub mod toast;
pub mod wallet;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use auth_flow::{AuthAction, AuthFlow, AuthStep};
pub use chat::ChatLog;
pub use config::AppConfig;
pub use error::ValidationError;
pub use session::{Session, SessionSnapshot, SessionStore, Tab};
pub use streams::StreamGrid;
pub use toast::{ToastLevel, Toasts};
