//! Domain types, access control and the ports the engine depends on.

pub mod access;
pub mod account;
pub mod events;
pub mod identity;
pub mod ports;
pub mod transaction;
