//! Rust Ledger Engine Library
//! # Overview
//!
//! This library provides a double-entry ledger core: balanced multi-line
//! transactions are validated, committed atomically into an append-only log,
//! and reflected in per-account balances. Resubmitting a transaction
//! identifier is idempotent when the lines match and a conflict otherwise.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Transaction, Account, LedgerError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Ledger logic:
//!   - [`core::validator`] - Structural checks and the zero-sum rule
//!   - [`core::conflict`] - Duplicate versus conflict on identifier reuse
//!   - [`core::transaction_log`] - Append-only store of accepted transactions
//!   - [`core::account_index`] - Balances derived from the log
//!   - [`core::engine`] - Single-owner engine
//!   - `core::async` - Thread-safe engine and batch processing
//! - [`io`] - JSON Lines input and CSV balance output
//! - [`strategy`] - Sync and async processing pipelines
//! - [`logging`] - Tracing subscriber setup
//!
//! # Invariants
//!
//! - Every accepted transaction's deltas sum to zero, so the sum of all
//!   account balances is always zero
//! - Each account's balance equals the sum of its deltas across the log
//! - A transaction is either fully applied or not applied at all

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{AsyncLedgerEngine, Ledger, LedgerConfig, LedgerEngine};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountId, CommitOutcome, Delta, LedgerError, Transaction, TransactionId,
    TransactionLine,
};
