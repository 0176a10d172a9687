//! Transactions service
//!
//! Resource service for `{base}transactions/`. Composes the resource
//! client; no validation, no reshaping.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::client::ResourceClient;
use super::ApiError;
use crate::model::{Transaction, TransactionKind, TransactionPage};
use crate::session::SessionStore;

/// Service for the transactions resource
#[derive(Debug, Clone)]
pub struct TransactionService {
    inner: ResourceClient,
}

/// Payload for creating a transaction
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub date: DateTime<Utc>,
    pub value: String,
    pub description: String,
}

impl TransactionService {
    pub fn new(base_url: &str, session: SessionStore) -> Self {
        Self {
            inner: ResourceClient::new(base_url, "transactions", session),
        }
    }

    /// Fetch the full transaction list for the session, unpaginated.
    pub async fn list(&self) -> Result<TransactionPage, ApiError> {
        self.inner.get("").await
    }

    /// Fetch a single transaction by id.
    pub async fn get(&self, id: &str) -> Result<Transaction, ApiError> {
        self.inner.get(id).await
    }

    /// Create a new transaction.
    pub async fn create(&self, body: &NewTransaction) -> Result<Transaction, ApiError> {
        self.inner.post("", body).await
    }
}
