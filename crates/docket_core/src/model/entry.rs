//! Entry domain model.
//!
//! # Responsibility
//! - Define the single persisted record of a docket list.
//! - Provide validation and id allocation helpers shared by the store.
//!
//! # Invariants
//! - `id` is positive and at most `MAX_ENTRY_ID`.
//! - `text` is never empty or whitespace-only.
//! - Ids within one collection are pairwise distinct.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for one entry inside its collection.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntryId = u64;

/// Largest id a collection may hold: the largest integer a JSON reader backed
/// by IEEE doubles keeps exact.
pub const MAX_ENTRY_ID: EntryId = (1 << 53) - 1;

/// Validation failures for entries and entry collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Text is empty or whitespace-only.
    EmptyText,
    /// Id `0` is reserved; allocated ids start at `1`.
    ZeroId,
    /// Two entries in one collection share the same id.
    DuplicateId(EntryId),
    /// Id exceeds `MAX_ENTRY_ID`.
    IdOutOfRange(EntryId),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "entry text must not be blank"),
            Self::ZeroId => write!(f, "entry id must be positive"),
            Self::DuplicateId(id) => write!(f, "duplicate entry id: {id}"),
            Self::IdOutOfRange(id) => write!(f, "entry id {id} exceeds {MAX_ENTRY_ID}"),
        }
    }
}

impl Error for EntryValidationError {}

/// One user-visible list item.
///
/// Field names are the persisted wire names (`id`, `text`, `complete`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub text: String,
    pub complete: bool,
}

impl Entry {
    /// Creates an incomplete entry.
    ///
    /// Does not validate; callers allocate `id` through [`next_entry_id`].
    pub fn new(id: EntryId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            complete: false,
        }
    }

    /// Checks the single-entry invariants.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.id == 0 {
            return Err(EntryValidationError::ZeroId);
        }
        if self.id > MAX_ENTRY_ID {
            return Err(EntryValidationError::IdOutOfRange(self.id));
        }
        validate_text(&self.text)
    }
}

/// Rejects empty and whitespace-only text.
pub fn validate_text(text: &str) -> Result<(), EntryValidationError> {
    if text.trim().is_empty() {
        return Err(EntryValidationError::EmptyText);
    }
    Ok(())
}

/// Checks every entry plus id uniqueness across the collection.
pub fn validate_collection(entries: &[Entry]) -> Result<(), EntryValidationError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        entry.validate()?;
        if !seen.insert(entry.id) {
            return Err(EntryValidationError::DuplicateId(entry.id));
        }
    }
    Ok(())
}

/// Returns the id for the next appended entry.
///
/// Uses `max + 1` rather than `len + 1` so a new id never collides with a
/// live entry. Returns `None` once `max` has reached `MAX_ENTRY_ID`.
pub fn next_entry_id(entries: &[Entry]) -> Option<EntryId> {
    let max = entries.iter().map(|entry| entry.id).max().unwrap_or(0);
    max.checked_add(1).filter(|id| *id <= MAX_ENTRY_ID)
}
