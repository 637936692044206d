//! Transaction-related types for the ledger engine
//!
//! This module defines the double-entry transaction, its lines, and the
//! outcome of submitting a transaction to the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::error::LedgerError;

/// Account identifier
///
/// Opaque, caller-assigned. Accounts are implicit: an identifier exists
/// once an accepted transaction line references it.
pub type AccountId = String;

/// Transaction identifier
///
/// Caller-supplied idempotency key, distinct from the log sequence number.
pub type TransactionId = String;

/// Signed balance change in the smallest currency unit
pub type Delta = i64;

/// Opaque audit annotation attached to a transaction
pub type Metadata = BTreeMap<String, Value>;

/// A single balance change within a transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionLine {
    /// The account this line moves funds in or out of
    pub account_id: AccountId,

    /// Signed amount applied to the account balance
    pub delta: Delta,
}

impl TransactionLine {
    pub fn new(account_id: impl Into<AccountId>, delta: Delta) -> Self {
        Self {
            account_id: account_id.into(),
            delta,
        }
    }
}

/// Double-entry transaction as submitted by a caller
///
/// Once accepted, a transaction is immutable and permanently reserves its
/// identifier in the log. The deltas of an accepted transaction sum to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Idempotency key
    pub id: TransactionId,

    /// Ordered balance changes; at least one is required
    #[serde(default)]
    pub lines: Vec<TransactionLine>,

    /// Audit annotation, never interpreted by the engine
    #[serde(default)]
    pub data: Metadata,
}

impl Transaction {
    pub fn new(id: impl Into<TransactionId>, lines: Vec<TransactionLine>) -> Self {
        Self {
            id: id.into(),
            lines,
            data: Metadata::new(),
        }
    }

    /// Attach a metadata entry, builder style
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Whether any line of this transaction references `account_id`
    pub fn touches(&self, account_id: &str) -> bool {
        self.lines.iter().any(|line| line.account_id == account_id)
    }
}

/// Successful result of submitting a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Fresh acceptance: one new log entry, balances updated
    Applied,

    /// Identical retry of an accepted transaction: nothing changed
    Duplicate,
}

impl CommitOutcome {
    /// Strict view of the outcome
    ///
    /// Callers that must distinguish a retry from a fresh acceptance (for
    /// example a transport layer answering with a dedicated status) get
    /// `TransactionDuplicate` for a retry.
    pub fn into_result(self, tx: &str) -> Result<(), LedgerError> {
        match self {
            CommitOutcome::Applied => Ok(()),
            CommitOutcome::Duplicate => Err(LedgerError::transaction_duplicate(tx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_transaction() {
        let raw = r#"{"id":"t1","lines":[{"account_id":"A","delta":100},{"account_id":"B","delta":-100}],"data":{"key":"val"}}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();

        assert_eq!(tx.id, "t1");
        assert_eq!(
            tx.lines,
            vec![TransactionLine::new("A", 100), TransactionLine::new("B", -100)]
        );
        assert_eq!(tx.data.get("key"), Some(&json!("val")));
    }

    #[test]
    fn test_deserialize_defaults_missing_lines_and_data() {
        let tx: Transaction = serde_json::from_str(r#"{"id":"t1"}"#).unwrap();
        assert!(tx.lines.is_empty());
        assert!(tx.data.is_empty());
    }

    #[test]
    fn test_touches() {
        let tx = Transaction::new(
            "t1",
            vec![TransactionLine::new("A", 5), TransactionLine::new("B", -5)],
        );
        assert!(tx.touches("A"));
        assert!(tx.touches("B"));
        assert!(!tx.touches("C"));
    }

    #[test]
    fn test_commit_outcome_into_result() {
        assert_eq!(CommitOutcome::Applied.into_result("t1"), Ok(()));
        assert_eq!(
            CommitOutcome::Duplicate.into_result("t1"),
            Err(LedgerError::TransactionDuplicate {
                tx: "t1".to_string()
            })
        );
    }
}
