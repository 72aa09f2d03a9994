//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its JSON shape.
//! - Normalize and validate user-supplied title/content input.
//! - Generate note ids and monotonic timestamps.
//!
//! # Invariants
//! - `id` is opaque and never changes after creation.
//! - `updated_at >= created_at`; each edit strictly advances `updated_at`.
//! - Timestamps carry millisecond precision and serialize as
//!   `YYYY-MM-DDTHH:MM:SS.sssZ`.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Title applied when a note is saved without one.
pub const UNTITLED: &str = "Untitled";

const ID_RANDOM_SUFFIX_LEN: usize = 8;

/// Opaque note identifier.
///
/// Kept as a plain string: ids loaded from storage are not guaranteed to
/// follow the format produced by [`generate_note_id`].
pub type NoteId = String;

/// One user-authored note as stored and listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Builds a fresh note from validated input.
    ///
    /// `created_at` and `updated_at` are both set to `now`.
    pub fn new(id: NoteId, draft: &NoteDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.resolved_title().to_string(),
            content: draft.content.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces title/content and refreshes `updated_at`.
    pub fn apply(&mut self, draft: &NoteDraft, now: DateTime<Utc>) {
        self.title = draft.resolved_title().to_string();
        self.content = draft.content.clone();
        self.updated_at = next_timestamp(now, Some(self.updated_at));
    }

    /// Title to show for this note; older records may carry an empty one.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            self.title.as_str()
        }
    }

    /// Timestamp shown as the "saved" stamp.
    pub fn last_saved_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Error for note input that cannot be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Both title and content are empty after trimming.
    EmptyNote,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNote => write!(f, "note needs a title or some content"),
        }
    }
}

impl Error for NoteValidationError {}

/// Trimmed title/content pair submitted by an add or edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    /// Trims both fields; does not validate.
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            content: content.trim().to_string(),
        }
    }

    /// Trims and validates in one step.
    pub fn parse(title: &str, content: &str) -> Result<Self, NoteValidationError> {
        let draft = Self::new(title, content);
        draft.validate()?;
        Ok(draft)
    }

    /// Rejects drafts where both fields are empty.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.title.is_empty() && self.content.is_empty() {
            return Err(NoteValidationError::EmptyNote);
        }
        Ok(())
    }

    /// Title to persist, defaulting to [`UNTITLED`].
    pub fn resolved_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            self.title.as_str()
        }
    }
}

/// Current UTC time truncated to millisecond precision.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Returns `now`, bumped past `previous` when the clock has not advanced.
pub fn next_timestamp(now: DateTime<Utc>, previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = now.trunc_subsecs(3);
    match previous {
        Some(prev) if prev >= now => prev + TimeDelta::milliseconds(1),
        _ => now,
    }
}

/// Generates a note id: base-36 epoch millis, `-`, random hex suffix.
pub fn generate_note_id(now: DateTime<Utc>) -> NoteId {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}",
        to_base36(millis),
        &random[..ID_RANDOM_SUFFIX_LEN]
    )
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Serde adapter for browser-style ISO-8601 timestamps.
pub(crate) mod iso_millis {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Local date-time without an offset; read as UTC.
    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(raw.trim()).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
            Err(rfc_err) => NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
                .map(|naive| naive.and_utc())
                .map_err(|_| rfc_err),
        }
    }
}
