//! # fastfin
//!
//! Terminal client for the Fast Finance HTTP API: authentication plus a
//! financial dashboard with aggregate statistics and chart views.
//!
//! ## Modules
//!
//! - [`api`]: HTTP client wrapper and per-resource services
//! - [`session`]: persisted bearer tokens and UI preferences
//! - [`dashboard`]: aggregation logic behind the dashboard numbers
//! - [`tui`]: terminal presentation (login form, dashboard, theme switcher)
//! - [`config`]: TOML configuration with environment overrides
//!
//! The dashboard aggregations are pure functions over the fetched
//! transaction list and can be used standalone:
//!
//! ```rust
//! use fastfin::dashboard::{totals, category_rollup};
//!
//! let transactions = vec![];
//! let t = totals(&transactions);
//! assert_eq!(t.net(), rust_decimal::Decimal::ZERO);
//! assert!(category_rollup(&transactions).is_empty());
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod model;
pub mod session;
pub mod tui;

// Re-export top-level types for convenience
pub use api::{ApiError, AuthService, LoginResponse, ResourceClient, TransactionService};
pub use config::{Config, ConfigError};
pub use dashboard::{CategoryRollup, Totals};
pub use model::{Transaction, TransactionKind, TransactionPage};
pub use session::{SessionError, SessionStore};
