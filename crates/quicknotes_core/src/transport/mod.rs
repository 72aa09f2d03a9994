//! Outbound network transports.
//!
//! # Responsibility
//! - Define the seam between feedback submission and the network.
//! - Keep HTTP client details out of service orchestration.

pub mod feedback_http;
