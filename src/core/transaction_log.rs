//! Append-only log of accepted transactions
//!
//! This module provides the TransactionLog, the source of truth of the ledger.
//! Entries are immutable once appended and are addressed two ways: by their
//! caller-supplied identifier and by their position (sequence number).
//!
//! # Identifier Reservation
//!
//! An identifier, once appended, is reserved forever. Appending a second
//! transaction with the same identifier is refused; the first entry is
//! authoritative.

use crate::types::{LedgerError, Transaction, TransactionId};
use std::collections::HashMap;

/// Position of an entry in the log, starting at zero
pub type Sequence = u64;

/// Append-only transaction log
#[derive(Debug, Default)]
pub struct TransactionLog {
    /// Accepted transactions in acceptance order
    entries: Vec<Transaction>,

    /// Map of transaction ID to position in `entries`
    by_id: HashMap<TransactionId, usize>,
}

impl TransactionLog {
    /// Create a new empty transaction log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an accepted transaction
    ///
    /// # Returns
    ///
    /// * `Ok(Sequence)` - the position assigned to the new entry
    /// * `Err(LedgerError::TransactionConflict)` - the identifier is taken;
    ///   the log is left unchanged
    pub fn append(&mut self, tx: Transaction) -> Result<Sequence, LedgerError> {
        if self.by_id.contains_key(&tx.id) {
            return Err(LedgerError::transaction_conflict(&tx.id));
        }

        let position = self.entries.len();
        self.by_id.insert(tx.id.clone(), position);
        self.entries.push(tx);

        Ok(position as Sequence)
    }

    /// Get an accepted transaction by identifier
    pub fn get(&self, tx_id: &str) -> Option<&Transaction> {
        self.by_id.get(tx_id).map(|&position| &self.entries[position])
    }

    /// Sequence number of an accepted transaction
    pub fn sequence_of(&self, tx_id: &str) -> Option<Sequence> {
        self.by_id.get(tx_id).map(|&position| position as Sequence)
    }

    pub fn contains(&self, tx_id: &str) -> bool {
        self.by_id.contains_key(tx_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over accepted transactions in acceptance order
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionLine;

    fn tx(id: &str, delta: i64) -> Transaction {
        Transaction::new(
            id,
            vec![TransactionLine::new("A", delta), TransactionLine::new("B", -delta)],
        )
    }

    #[test]
    fn test_append_and_get() {
        let mut log = TransactionLog::new();

        let seq = log.append(tx("t1", 100)).unwrap();

        assert_eq!(seq, 0);
        assert_eq!(log.len(), 1);
        assert!(log.contains("t1"));
        assert_eq!(log.get("t1"), Some(&tx("t1", 100)));
    }

    #[test]
    fn test_get_nonexistent_transaction() {
        let log = TransactionLog::new();
        assert!(log.is_empty());
        assert!(log.get("missing").is_none());
        assert!(log.sequence_of("missing").is_none());
    }

    #[test]
    fn test_sequence_numbers_follow_acceptance_order() {
        let mut log = TransactionLog::new();

        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            assert_eq!(log.append(tx(id, 1)).unwrap(), i as Sequence);
        }

        assert_eq!(log.sequence_of("b"), Some(1));
        let ids: Vec<&str> = log.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_append_refuses_reused_identifier() {
        let mut log = TransactionLog::new();
        log.append(tx("t1", 100)).unwrap();

        let result = log.append(tx("t1", 200));

        assert_eq!(result, Err(LedgerError::transaction_conflict("t1")));
        assert_eq!(log.len(), 1);
        // First entry stays authoritative
        assert_eq!(log.get("t1"), Some(&tx("t1", 100)));
    }
}
