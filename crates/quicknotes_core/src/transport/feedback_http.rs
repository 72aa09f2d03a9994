//! Feedback transport contract and HTTP implementation.
//!
//! # Responsibility
//! - Deliver one `FeedbackMessage` to the feedback endpoint per call.
//! - Report the raw HTTP status; status classification belongs to callers.
//!
//! # Invariants
//! - Exactly one request per `post_feedback` call; no retries.
//! - Requests are `POST` with a JSON body and `Content-Type: application/json`.

use crate::config::QuickNotesConfig;
use crate::model::feedback::FeedbackMessage;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Status line of a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request never produced a response (connect, DNS, TLS, timeout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub detail: String,
    pub timed_out: bool,
}

impl Display for TransportFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.timed_out {
            write!(f, "request timed out: {}", self.detail)
        } else {
            write!(f, "request failed: {}", self.detail)
        }
    }
}

impl Error for TransportFailure {}

/// Sends feedback to a remote endpoint.
#[async_trait]
pub trait FeedbackTransport: Send + Sync {
    async fn post_feedback(
        &self,
        message: &FeedbackMessage,
    ) -> Result<TransportResponse, TransportFailure>;
}

/// `reqwest`-backed transport posting to a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpFeedbackClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpFeedbackClient {
    /// Builds a client for `endpoint` with an optional whole-request timeout.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportFailure> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| TransportFailure {
            detail: format!("cannot build http client: {err}"),
            timed_out: false,
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn from_config(config: &QuickNotesConfig) -> Result<Self, TransportFailure> {
        Self::new(config.feedback_endpoint.trim(), config.feedback_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl FeedbackTransport for HttpFeedbackClient {
    async fn post_feedback(
        &self,
        message: &FeedbackMessage,
    ) -> Result<TransportResponse, TransportFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(message)
            .send()
            .await
            .map_err(|err| TransportFailure {
                timed_out: err.is_timeout(),
                detail: err.to_string(),
            })?;

        Ok(TransportResponse {
            status: response.status().as_u16(),
        })
    }
}
