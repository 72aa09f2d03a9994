//! Feedback submission use-case.
//!
//! # Responsibility
//! - Validate feedback input before anything touches the network.
//! - Classify transport outcomes into success, transport or server errors.
//! - Supply the generic user-facing status texts.
//!
//! # Invariants
//! - Invalid input never reaches the transport.
//! - At most one transport call per `submit`; no retries.
//! - The submitter holds no state between calls.

use crate::model::feedback::{FeedbackMessage, FeedbackValidationError};
use crate::transport::feedback_http::FeedbackTransport;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MSG_MISSING_FIELDS: &str = "Please fill in all fields.";
pub const MSG_SEND_FAILED: &str = "Could not send feedback. Please try again later.";
pub const MSG_SENT: &str = "Thank you! Your feedback has been sent.";

/// Error for feedback submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    Validation(FeedbackValidationError),
    /// No response was received.
    Transport(String),
    /// Endpoint answered with a non-2xx status.
    Server { status: u16 },
}

impl FeedbackError {
    /// Generic text for the form's status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => MSG_MISSING_FIELDS,
            Self::Transport(_) | Self::Server { .. } => MSG_SEND_FAILED,
        }
    }
}

impl Display for FeedbackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Transport(detail) => write!(f, "feedback transport error: {detail}"),
            Self::Server { status } => write!(f, "server responded with status {status}"),
        }
    }
}

impl Error for FeedbackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FeedbackValidationError> for FeedbackError {
    fn from(value: FeedbackValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackReceipt {
    pub status: u16,
}

impl FeedbackReceipt {
    pub fn user_message(&self) -> &'static str {
        MSG_SENT
    }
}

/// Stateless feedback submitter over a transport.
pub struct FeedbackSubmitter<T: FeedbackTransport> {
    transport: T,
}

impl<T: FeedbackTransport> FeedbackSubmitter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validates and sends one feedback message.
    ///
    /// # Errors
    /// - `Validation` when any field is blank; no request is made.
    /// - `Transport` when the request fails without a response.
    /// - `Server` when the endpoint answers with a non-2xx status.
    pub async fn submit(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<FeedbackReceipt, FeedbackError> {
        let payload = FeedbackMessage::new(name, email, message).map_err(|err| {
            info!(
                "event=feedback_submit module=feedback status=rejected missing={}",
                err.missing_fields.join(",")
            );
            err
        })?;

        info!(
            "event=feedback_submit module=feedback status=start message_chars={}",
            payload.message().chars().count()
        );
        let response = self.transport.post_feedback(&payload).await.map_err(|err| {
            warn!(
                "event=feedback_submit module=feedback status=error error_code=transport_failed timed_out={} error={}",
                err.timed_out, err.detail
            );
            FeedbackError::Transport(err.to_string())
        })?;

        if !response.is_success() {
            warn!(
                "event=feedback_submit module=feedback status=error error_code=server_status http_status={}",
                response.status
            );
            return Err(FeedbackError::Server {
                status: response.status,
            });
        }

        info!(
            "event=feedback_submit module=feedback status=ok http_status={}",
            response.status
        );
        Ok(FeedbackReceipt {
            status: response.status,
        })
    }
}
