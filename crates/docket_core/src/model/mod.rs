//! Docket domain model.
//!
//! # Responsibility
//! - Define the entry record and the collection-level invariants.
//!
//! # Invariants
//! - Every entry is identified by a positive `EntryId`, unique per collection.
//! - Deletion removes an entry outright; there are no tombstones.

pub mod entry;
