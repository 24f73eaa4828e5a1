//! # pontoon-service: Keyed Table Registry and Timed Raise Wait
//!
//! Hosts [`pontoon_engine`] tables behind opaque table and wallet-scope
//! keys, the way a chat-platform adapter consumes them: one table per
//! channel, one shared wallet per server. Tables and wallets are created
//! on first use and never expire on their own; discarding a table is the
//! caller's decision.
//!
//! The one suspension point in the whole system lives here: after a
//! raise opens, [`registry::TableService::wait_for_raise`] waits for
//! every invited responder, finishing the instant all have answered and
//! otherwise folding the absentees at the deadline.
//!
//! ## Modules
//!
//! - [`registry`] - Table/wallet registries and the player-facing operations
//! - [`config`] - Service configuration (engine config + raise timeout)
//! - [`logging`] - tracing subscriber setup
//! - [`errors`] - Service-level error types

pub mod config;
pub mod errors;
pub mod logging;
pub mod registry;
