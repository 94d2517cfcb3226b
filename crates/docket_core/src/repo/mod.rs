//! Storage medium abstractions and implementations.
//!
//! # Responsibility
//! - Define the string-keyed `get`/`set` contract the entry store writes to.
//! - Isolate SQLite details from the state-synchronization engine.

pub mod kv_repo;
