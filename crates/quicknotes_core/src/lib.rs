//! Core domain logic for QuickNotes.
//! This crate is the single source of truth for note and feedback invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod transport;

pub use config::{ConfigError, QuickNotesConfig, DEFAULT_FEEDBACK_ENDPOINT, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::feedback::{FeedbackMessage, FeedbackValidationError};
pub use model::note::{Note, NoteDraft, NoteId, NoteValidationError, UNTITLED};
pub use repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
pub use repo::memory_kv::MemoryKvStore;
pub use repo::sqlite_kv::SqliteKvStore;
pub use service::feedback_service::{
    FeedbackError, FeedbackReceipt, FeedbackSubmitter, MSG_MISSING_FIELDS, MSG_SEND_FAILED,
    MSG_SENT,
};
pub use service::note_store::{NoteStore, NoteStoreError};
pub use transport::feedback_http::{
    FeedbackTransport, HttpFeedbackClient, TransportFailure, TransportResponse,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
