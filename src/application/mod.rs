//! Application layer containing the escrow state machine.
//!
//! [`engine::EscrowEngine`] is the synchronous core; [`shared::SharedEscrow`]
//! wraps it for hosts that issue calls from several `tokio` tasks, and
//! [`command::Command`] is the scripted form of a single call.

pub mod command;
pub mod engine;
pub mod shared;
