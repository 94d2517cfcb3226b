//! Snapshot codec for the persisted entry collection.
//!
//! The stored value is a JSON array of `{ "id", "text", "complete" }`
//! objects in display order.

use crate::model::entry::{validate_collection, Entry, EntryValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a stored snapshot cannot be used.
#[derive(Debug)]
pub enum SnapshotError {
    Parse(serde_json::Error),
    Invalid(EntryValidationError),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed snapshot: {err}"),
            Self::Invalid(err) => write!(f, "invalid snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

pub fn encode(entries: &[Entry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(entries)
}

/// Parses and validates a stored snapshot.
///
/// A snapshot that parses but breaks id uniqueness or carries blank text is
/// rejected as a whole.
pub fn decode(raw: &str) -> Result<Vec<Entry>, SnapshotError> {
    let entries: Vec<Entry> = serde_json::from_str(raw).map_err(SnapshotError::Parse)?;
    validate_collection(&entries).map_err(SnapshotError::Invalid)?;
    Ok(entries)
}
