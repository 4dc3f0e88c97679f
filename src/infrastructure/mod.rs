//! Adapters implementing the domain ports.

pub mod events;
pub mod in_memory;
