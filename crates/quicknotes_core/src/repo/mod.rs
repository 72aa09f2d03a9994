//! Key-value persistence contracts and backends.
//!
//! # Responsibility
//! - Define the `KeyValueStore` contract the note store persists through.
//! - Isolate SQLite details from store orchestration.
//!
//! # Invariants
//! - Backends store opaque string values; they never parse note JSON.
//! - A missing key is `Ok(None)`, not an error.

pub mod kv_repo;
pub mod memory_kv;
pub mod sqlite_kv;
