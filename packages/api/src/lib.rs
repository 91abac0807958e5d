//! # API crate: the Trench Social wire layer
//!
//! Everything the client exchanges with the outside world is typed here. The
//! crate is UI-agnostic and compiles for both wasm and native targets.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Users, posts, comments, chat and direct messages, reports, notifications |
//! | [`client`] | [`ApiClient`], one `async fn` per REST endpoint |
//! | [`socket`] | Engine.IO / Socket.IO frame codec and the chat protocol state machine |
//! | [`solana`] | Legacy transfer-message encoder used to pay for verification |
//! | [`rpc`] | Solana JSON-RPC calls: latest blockhash and signature status |
//! | [`error`] | [`ApiError`] and the crate's `Result` alias |

pub mod client;
pub mod error;
pub mod models;
pub mod rpc;
pub mod socket;
pub mod solana;

pub use client::{ApiClient, CodeCheck, Registration};
pub use error::{ApiError, Result};
pub use models::*;
pub use rpc::{Confirmation, RpcClient, SignatureStatus};
pub use socket::{ChatEvent, ChatProtocol};
pub use solana::{Blockhash, Pubkey, TransferMessage};
