//! Café POS client library.
//!
//! Typed REST services over the backend, in-memory state stores with
//! loading/error slots, the persisted session, and the cash handover and
//! shift reconciliation workflow between waiters, cashiers and managers.
//! The `pos-client` binary drives the handover workflow from the command line.

pub mod api;
pub mod config;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod messages;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;
pub mod stores;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
