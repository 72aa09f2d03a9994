//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate storage and transport calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage and network details.

pub mod feedback_service;
pub mod note_store;
