//! State-synchronization services.
//!
//! # Responsibility
//! - Own the entry collection and its persistence (`entry_store`).
//! - Wire the store to a presentation adapter (`coordinator`).
//! - Keep UI layers decoupled from storage details.

pub mod coordinator;
pub mod entry_store;
pub mod snapshot;
