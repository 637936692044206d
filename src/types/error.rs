//! Error types for the ledger engine
//!
//! This module defines every error that can surface from the engine or the
//! processing pipeline around it.
//!
//! # Error Categories
//!
//! - **Ledger Errors**: the four caller-visible outcomes of the engine
//!   (`AccountNotFound`, `TransactionInvalid`, `TransactionDuplicate`,
//!   `TransactionConflict`). None of them is fatal and every rejection leaves
//!   the ledger unchanged.
//! - **File I/O Errors**: file not found, permission denied, etc.
//! - **Parsing Errors**: malformed JSON input records

use thiserror::Error;

/// Why a transaction failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    /// The idempotency key is empty
    #[error("missing transaction id")]
    MissingTransactionId,

    /// The transaction carries no lines at all
    #[error("no transaction lines")]
    NoLines,

    /// A line has an empty account identifier
    #[error("line {line} has no account id")]
    MissingAccountId {
        /// Zero-based position of the offending line
        line: usize,
    },

    /// The deltas do not sum to zero
    #[error("lines do not balance (sum {sum})")]
    Unbalanced {
        /// The non-zero sum of all deltas
        sum: i128,
    },

    /// Applying the transaction would overflow an account balance
    #[error("balance overflow on account {account}")]
    BalanceOverflow {
        /// The account whose balance would leave the i64 range
        account: String,
    },
}

/// Main error type for the ledger engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Read of an account no accepted transaction line has referenced
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The requested account identifier
        account: String,
    },

    /// Structural failure of a submitted transaction
    ///
    /// The transaction is rejected and no state changes.
    #[error("Transaction {tx} is invalid: {reason}")]
    TransactionInvalid {
        /// Transaction identifier (may be empty)
        tx: String,
        /// The first check that failed
        reason: InvalidReason,
    },

    /// Identical retry of an already accepted transaction
    ///
    /// Informational: the engine itself reports retries as
    /// [`CommitOutcome::Duplicate`](crate::types::CommitOutcome::Duplicate).
    /// This variant exists for callers that opt into strict reporting.
    #[error("Transaction {tx} is a duplicate")]
    TransactionDuplicate {
        /// Transaction identifier
        tx: String,
    },

    /// Identifier reused with different content
    ///
    /// Permanently rejected; the stored transaction is authoritative.
    #[error("Transaction {tx} conflicts with an accepted transaction")]
    TransactionConflict {
        /// Transaction identifier
        tx: String,
    },

    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A worker task panicked or was cancelled before reporting its outcomes
    #[error("Processing task failed: {message}")]
    TaskFailed {
        /// Description of the task failure
        message: String,
    },

    /// Input record could not be parsed
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and processing continues with the next record.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        LedgerError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create a TransactionInvalid error
    pub fn transaction_invalid(tx: &str, reason: InvalidReason) -> Self {
        LedgerError::TransactionInvalid {
            tx: tx.to_string(),
            reason,
        }
    }

    /// Create a TransactionDuplicate error
    pub fn transaction_duplicate(tx: &str) -> Self {
        LedgerError::TransactionDuplicate { tx: tx.to_string() }
    }

    /// Create a TransactionConflict error
    pub fn transaction_conflict(tx: &str) -> Self {
        LedgerError::TransactionConflict { tx: tx.to_string() }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        LedgerError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a ParseError error with a line number
    pub fn parse_error(line: u64, message: &str) -> Self {
        LedgerError::ParseError {
            line: Some(line),
            message: message.to_string(),
        }
    }

    /// Create a TaskFailed error
    pub fn task_failed(message: &str) -> Self {
        LedgerError::TaskFailed {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::account_not_found(
        LedgerError::AccountNotFound { account: "X".to_string() },
        "Account X not found"
    )]
    #[case::invalid_unbalanced(
        LedgerError::TransactionInvalid { tx: "t1".to_string(), reason: InvalidReason::Unbalanced { sum: 1 } },
        "Transaction t1 is invalid: lines do not balance (sum 1)"
    )]
    #[case::invalid_no_lines(
        LedgerError::TransactionInvalid { tx: "t1".to_string(), reason: InvalidReason::NoLines },
        "Transaction t1 is invalid: no transaction lines"
    )]
    #[case::invalid_missing_account(
        LedgerError::TransactionInvalid { tx: "t1".to_string(), reason: InvalidReason::MissingAccountId { line: 2 } },
        "Transaction t1 is invalid: line 2 has no account id"
    )]
    #[case::invalid_overflow(
        LedgerError::TransactionInvalid { tx: "t1".to_string(), reason: InvalidReason::BalanceOverflow { account: "A".to_string() } },
        "Transaction t1 is invalid: balance overflow on account A"
    )]
    #[case::duplicate(
        LedgerError::TransactionDuplicate { tx: "t1".to_string() },
        "Transaction t1 is a duplicate"
    )]
    #[case::conflict(
        LedgerError::TransactionConflict { tx: "t1".to_string() },
        "Transaction t1 conflicts with an accepted transaction"
    )]
    #[case::file_not_found(
        LedgerError::FileNotFound { path: "input.jsonl".to_string() },
        "File not found: input.jsonl"
    )]
    #[case::task_failed(
        LedgerError::TaskFailed { message: "task 7 panicked".to_string() },
        "Processing task failed: task 7 panicked"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(42), message: "expected value".to_string() },
        "Parse error at line 42: expected value"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "expected value".to_string() },
        "Parse error: expected value"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::account_not_found(
        LedgerError::account_not_found("X"),
        LedgerError::AccountNotFound { account: "X".to_string() }
    )]
    #[case::transaction_invalid(
        LedgerError::transaction_invalid("t1", InvalidReason::NoLines),
        LedgerError::TransactionInvalid { tx: "t1".to_string(), reason: InvalidReason::NoLines }
    )]
    #[case::transaction_conflict(
        LedgerError::transaction_conflict("t1"),
        LedgerError::TransactionConflict { tx: "t1".to_string() }
    )]
    #[case::parse_error(
        LedgerError::parse_error(3, "bad"),
        LedgerError::ParseError { line: Some(3), message: "bad".to_string() }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
