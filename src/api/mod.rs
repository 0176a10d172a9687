//! Fast Finance API Access
//!
//! Thin HTTP layer over the remote API: a verb-scoped resource client plus
//! one service per backend resource. Failures are reported as-is to the
//! caller; nothing in here retries, refreshes tokens, or reshapes
//! responses.

pub mod auth;
pub mod client;
pub mod transactions;

pub use auth::{AuthService, LoginRequest, LoginResponse};
pub use client::ResourceClient;
pub use transactions::{NewTransaction, TransactionService};

use thiserror::Error;

/// Errors reported by the API layer. Network failure, non-2xx status and
/// malformed bodies all land here and are handled identically upstream
/// (logged, loading state cleared).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,
}

impl ApiError {
    /// Classify a transport-level reqwest failure.
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable
        } else {
            ApiError::Request(e)
        }
    }
}
