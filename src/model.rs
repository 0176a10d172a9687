//! Wire Data Model
//!
//! Transaction records as the Fast Finance API returns them. Records are
//! immutable once fetched; the dashboard owns its list for the duration of
//! a visit and drops it on logout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction direction. The API speaks Portuguese here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Income
    Receita,
    /// Expense
    Despesa,
}

/// A single transaction record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub category: String,

    pub date: DateTime<Utc>,

    /// Monetary value as a decimal string, kept verbatim from the wire
    pub value: String,

    pub description: String,
}

impl Transaction {
    /// Parsed monetary value. Unparsable values count as zero so that the
    /// aggregations stay total functions over whatever the API returned.
    pub fn amount(&self) -> Decimal {
        self.value.trim().parse().unwrap_or(Decimal::ZERO)
    }
}

/// Envelope of `GET {base}transactions/`
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionPage {
    pub data: Vec<Transaction>,
    pub total: u64,
}
