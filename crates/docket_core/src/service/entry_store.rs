//! Entry store: the single owner of the docket collection.
//!
//! # Responsibility
//! - Load the collection once from the string-keyed store.
//! - Apply add/edit/delete/toggle under validation rules.
//! - Persist a full snapshot and notify the change callback after each
//!   applied mutation.
//!
//! # Invariants
//! - Entry ids are pairwise distinct at every observable point.
//! - After a mutation returns, memory and storage hold the same collection.
//! - Each operation touches at most one entry.
//! - A failed write leaves memory unchanged and notifies nobody.

use crate::config::StoreConfig;
use crate::model::entry::{next_entry_id, validate_text, Entry, EntryId};
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use crate::service::snapshot;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EntryStoreResult<T> = Result<T, EntryStoreError>;

/// Callback receiving the full collection after each applied mutation.
pub type ChangeCallback = Box<dyn FnMut(&[Entry])>;

/// Mutation failures that must be surfaced to the caller.
#[derive(Debug)]
pub enum EntryStoreError {
    /// Storage rejected the snapshot write.
    PersistenceFailure(RepoError),
    /// The snapshot could not be serialized.
    Encode(serde_json::Error),
}

impl Display for EntryStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersistenceFailure(err) => write!(f, "failed to persist entries: {err}"),
            Self::Encode(err) => write!(f, "failed to encode entries: {err}"),
        }
    }
}

impl Error for EntryStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PersistenceFailure(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<RepoError> for EntryStoreError {
    fn from(value: RepoError) -> Self {
        Self::PersistenceFailure(value)
    }
}

/// Why a request was absorbed without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyText,
    UnknownId(EntryId),
    /// The collection already holds `MAX_ENTRY_ID`; no larger id is left.
    IdSpaceExhausted,
}

/// Result of a mutation request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The collection changed; `id` is the created or touched entry.
    Applied { id: EntryId },
    /// Validation rejected the request; nothing was written or notified.
    Ignored(IgnoreReason),
}

/// Owner of the docket collection over a string-keyed repository.
pub struct EntryStore<R: KeyValueRepository> {
    repo: R,
    config: StoreConfig,
    entries: Vec<Entry>,
    on_change: Option<ChangeCallback>,
}

impl<R: KeyValueRepository> EntryStore<R> {
    /// Loads the collection under the default `dockets` key.
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, StoreConfig::default())
    }

    /// Loads the collection under `config.storage_key`.
    ///
    /// Missing, unreadable, or corrupt state yields an empty collection; the
    /// cause is logged and never returned.
    pub fn with_config(repo: R, config: StoreConfig) -> Self {
        let entries = load_entries(&repo, &config.storage_key);
        Self {
            repo,
            config,
            entries,
            on_change: None,
        }
    }

    /// Registers the change callback, replacing any previous one.
    pub fn on_change(&mut self, callback: impl FnMut(&[Entry]) + 'static) {
        if self.on_change.is_some() {
            debug!("event=entry_store_on_change module=service status=replaced");
        }
        self.on_change = Some(Box::new(callback));
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    /// Appends a new incomplete entry with id `max + 1`.
    ///
    /// Ignored with `IdSpaceExhausted` once the collection holds
    /// `MAX_ENTRY_ID`.
    pub fn add(&mut self, text: &str) -> EntryStoreResult<MutationOutcome> {
        if validate_text(text).is_err() {
            return Ok(self.ignore("add", IgnoreReason::EmptyText));
        }

        let Some(id) = next_entry_id(&self.entries) else {
            return Ok(self.ignore("add", IgnoreReason::IdSpaceExhausted));
        };
        let mut next = self.entries.clone();
        next.push(Entry::new(id, text));
        self.commit("add", id, next)
    }

    /// Replaces the text of entry `id`, keeping its id and completion flag.
    pub fn edit(&mut self, id: EntryId, new_text: &str) -> EntryStoreResult<MutationOutcome> {
        if validate_text(new_text).is_err() {
            return Ok(self.ignore("edit", IgnoreReason::EmptyText));
        }
        let Some(index) = self.position(id) else {
            return Ok(self.ignore("edit", IgnoreReason::UnknownId(id)));
        };

        let mut next = self.entries.clone();
        next[index].text = new_text.to_string();
        self.commit("edit", id, next)
    }

    /// Removes entry `id`; the rest keep their relative order.
    pub fn delete(&mut self, id: EntryId) -> EntryStoreResult<MutationOutcome> {
        let Some(index) = self.position(id) else {
            return Ok(self.ignore("delete", IgnoreReason::UnknownId(id)));
        };

        let mut next = self.entries.clone();
        next.remove(index);
        self.commit("delete", id, next)
    }

    /// Flips the completion flag of entry `id`.
    pub fn toggle(&mut self, id: EntryId) -> EntryStoreResult<MutationOutcome> {
        let Some(index) = self.position(id) else {
            return Ok(self.ignore("toggle", IgnoreReason::UnknownId(id)));
        };

        let mut next = self.entries.clone();
        next[index].complete = !next[index].complete;
        self.commit("toggle", id, next)
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn ignore(&self, op: &'static str, reason: IgnoreReason) -> MutationOutcome {
        debug!("event=entry_mutation module=service status=skip op={op} reason={reason:?}");
        MutationOutcome::Ignored(reason)
    }

    // Write first, then swap and notify, so observers never see unsaved state.
    fn commit(
        &mut self,
        op: &'static str,
        id: EntryId,
        next: Vec<Entry>,
    ) -> EntryStoreResult<MutationOutcome> {
        let payload = snapshot::encode(&next).map_err(|err| {
            error!("event=entry_mutation module=service status=error op={op} id={id} error_code=encode_failed error={err}");
            EntryStoreError::Encode(err)
        })?;

        if let Err(err) = self.repo.set(&self.config.storage_key, &payload) {
            error!("event=entry_mutation module=service status=error op={op} id={id} error_code=persist_failed error={err}");
            return Err(err.into());
        }

        self.entries = next;
        info!(
            "event=entry_mutation module=service status=ok op={op} id={id} count={}",
            self.entries.len()
        );

        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.entries);
        }

        Ok(MutationOutcome::Applied { id })
    }
}

fn load_entries<R: KeyValueRepository>(repo: &R, key: &str) -> Vec<Entry> {
    let raw = match repo.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=entry_store_load module=service status=ok source=empty key={key}");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=entry_store_load module=service status=error error_code=read_failed key={key} error={err}");
            return Vec::new();
        }
    };

    match snapshot::decode(&raw) {
        Ok(entries) => {
            info!(
                "event=entry_store_load module=service status=ok source=storage key={key} count={}",
                entries.len()
            );
            entries
        }
        Err(err) => {
            warn!(
                "event=entry_store_load module=service status=error error_code=corrupt_snapshot key={key} bytes={} error={err}",
                raw.len()
            );
            Vec::new()
        }
    }
}
