//! Core business logic module
//!
//! This module contains the ledger engine components:
//! - `validator` - Structural checks on submitted transactions
//! - `conflict` - Duplicate-versus-conflict decision on identifier reuse
//! - `transaction_log` - Append-only store of accepted transactions
//! - `account_index` - Per-account balances derived from the log
//! - `query` - Filtering over accepted transactions
//! - `engine` - Single-owner orchestration of the above
//! - `traits` - Trait abstraction over both engines
//! - `async` - Thread-safe engine and batch processing

pub mod account_index;
pub mod r#async;
pub mod conflict;
pub mod engine;
pub mod query;
pub mod traits;
pub mod transaction_log;
pub mod validator;

pub use account_index::AccountIndex;
pub use conflict::{ConflictResolver, IdentityPolicy, Resolution};
pub use engine::{LedgerConfig, LedgerEngine};
pub use query::TransactionQuery;
pub use r#async::{AsyncLedgerEngine, BatchProcessor};
pub use traits::Ledger;
pub use transaction_log::TransactionLog;
