//! Note collection store.
//!
//! # Responsibility
//! - Own the authoritative, ordered in-memory list of notes.
//! - Mirror the list to a `KeyValueStore` under one fixed key as a JSON array.
//! - Provide create/update/delete/list use-cases with input validation.
//!
//! # Invariants
//! - Note ids are unique within the store at all times.
//! - New notes go to the front; updates keep their position.
//! - Storage read/write failures are logged, never returned to callers.
//! - A rejected create/update leaves the list and storage untouched.

use crate::config::DEFAULT_STORAGE_KEY;
use crate::model::note::{
    generate_note_id, now_millis, Note, NoteDraft, NoteId, NoteValidationError,
};
use crate::repo::kv_repo::KeyValueStore;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error for note store use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStoreError {
    /// Title and content are both empty.
    Validation(NoteValidationError),
    /// Target note does not exist (anymore).
    NotFound(NoteId),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<NoteValidationError> for NoteStoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// In-memory note list synchronized with key-value storage.
pub struct NoteStore<S: KeyValueStore> {
    storage: S,
    key: String,
    notes: Vec<Note>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Creates an empty store persisting under `key`. Call [`Self::load`]
    /// to pick up previously saved notes.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            notes: Vec::new(),
        }
    }

    /// Creates an empty store using [`DEFAULT_STORAGE_KEY`].
    pub fn with_default_key(storage: S) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    /// Replaces the in-memory list with what storage holds.
    ///
    /// Absent, malformed or non-array data yields an empty list. Array
    /// elements that are not valid notes are skipped; duplicate ids keep the
    /// first occurrence.
    pub fn load(&mut self) {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=notes_load module=store status=ok source=empty");
                self.notes = Vec::new();
                return;
            }
            Err(err) => {
                warn!("event=notes_load module=store status=error error_code=storage_read_failed error={err}");
                self.notes = Vec::new();
                return;
            }
        };

        self.notes = decode_notes(&raw);
        info!(
            "event=notes_load module=store status=ok note_count={}",
            self.notes.len()
        );
    }

    /// Current notes, most recently created first.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Creates a note at the front of the list and persists.
    ///
    /// # Errors
    /// - `Validation` when title and content are both blank.
    pub fn create(&mut self, title: &str, content: &str) -> Result<Note, NoteStoreError> {
        let draft = NoteDraft::parse(title, content)?;
        let now = now_millis();
        let id = self.fresh_id(now);
        let note = Note::new(id, &draft, now);

        self.notes.insert(0, note.clone());
        info!(
            "event=note_create module=store status=ok note_count={}",
            self.notes.len()
        );
        self.persist();
        Ok(note)
    }

    /// Replaces title/content of an existing note in place and persists.
    ///
    /// # Errors
    /// - `Validation` when title and content are both blank.
    /// - `NotFound` when `id` is unknown.
    pub fn update(&mut self, id: &str, title: &str, content: &str) -> Result<Note, NoteStoreError> {
        let draft = NoteDraft::parse(title, content)?;
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| NoteStoreError::NotFound(id.to_string()))?;

        note.apply(&draft, now_millis());
        let updated = note.clone();
        info!("event=note_update module=store status=ok");
        self.persist();
        Ok(updated)
    }

    /// Removes the note with `id` and persists. Unknown ids are a no-op.
    ///
    /// Returns the removed note so callers can offer their own undo.
    pub fn delete(&mut self, id: &str) -> Option<Note> {
        let index = self.notes.iter().position(|note| note.id == id);
        let removed = index.map(|index| self.notes.remove(index));

        info!(
            "event=note_delete module=store status=ok removed={} note_count={}",
            removed.is_some(),
            self.notes.len()
        );
        self.persist();
        removed
    }

    /// Writes the full list to storage; failures are logged only.
    pub fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.notes) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!("event=notes_persist module=store status=error error_code=serialize_failed error={err}");
                return;
            }
        };

        match self.storage.set_item(&self.key, &serialized) {
            Ok(()) => debug!(
                "event=notes_persist module=store status=ok bytes={}",
                serialized.len()
            ),
            Err(err) => warn!(
                "event=notes_persist module=store status=error error_code=storage_write_failed error={err}"
            ),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn fresh_id(&self, now: DateTime<Utc>) -> NoteId {
        loop {
            let candidate = generate_note_id(now);
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

fn decode_notes(raw: &str) -> Vec<Note> {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("event=notes_load module=store status=error error_code=not_an_array");
            return Vec::new();
        }
        Err(err) => {
            warn!("event=notes_load module=store status=error error_code=invalid_json error={err}");
            return Vec::new();
        }
    };

    let total = items.len();
    let mut seen = HashSet::new();
    let notes: Vec<Note> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Note>(item).ok())
        .filter(|note| seen.insert(note.id.clone()))
        .collect();

    if notes.len() < total {
        warn!(
            "event=notes_load module=store status=partial skipped={} note_count={}",
            total - notes.len(),
            notes.len()
        );
    }
    notes
}
