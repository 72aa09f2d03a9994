//! Feedback message model.
//!
//! # Invariants
//! - A constructed `FeedbackMessage` has three non-empty, trimmed fields.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validated feedback payload; serializes as `{name, email, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackMessage {
    name: String,
    email: String,
    message: String,
}

/// Required feedback fields that were blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackValidationError {
    pub missing_fields: Vec<&'static str>,
}

impl Display for FeedbackValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "missing required feedback fields: {}",
            self.missing_fields.join(", ")
        )
    }
}

impl Error for FeedbackValidationError {}

impl FeedbackMessage {
    /// Trims all fields and requires each to be non-empty.
    pub fn new(name: &str, email: &str, message: &str) -> Result<Self, FeedbackValidationError> {
        let (name, email, message) = (name.trim(), email.trim(), message.trim());
        let missing_fields: Vec<&'static str> = [("name", name), ("email", email), ("message", message)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();

        if !missing_fields.is_empty() {
            return Err(FeedbackValidationError { missing_fields });
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
