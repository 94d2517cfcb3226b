//! Core state-synchronization engine for Docket.
//! This crate is the single source of truth for entry invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entry::{Entry, EntryId, EntryValidationError, MAX_ENTRY_ID};
pub use presentation::{EditBuffer, Gesture, GestureResult, GestureSlots, PresentationAdapter};
pub use repo::kv_repo::{
    KeyValueRepository, MemoryKeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository,
};
pub use service::coordinator::{Coordinator, GestureHandlers};
pub use service::entry_store::{
    EntryStore, EntryStoreError, EntryStoreResult, IgnoreReason, MutationOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
