//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account snapshot type
//! - `transaction`: Transactions, lines, identifiers and commit outcomes
//! - `error`: Error types for the ledger engine

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, Balance};
pub use error::{InvalidReason, LedgerError};
pub use transaction::{
    AccountId, CommitOutcome, Delta, Metadata, Transaction, TransactionId, TransactionLine,
};
