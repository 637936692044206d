//! Account balance index
//!
//! This module provides the AccountIndex, a projection of the transaction log
//! onto per-account balances. The index is derived state: it can always be
//! rebuilt by replaying the log, and the engine keeps it in step with the log
//! by applying each accepted transaction exactly once.
//!
//! # Two-Phase Apply
//!
//! Applying a transaction is split in two steps so that a commit never
//! leaves some accounts updated and others not:
//!
//! 1. [`AccountIndex::prepare`] computes every new balance with checked
//!    arithmetic and touches nothing. Overflow is reported here.
//! 2. [`AccountIndex::commit`] writes the precomputed balances and cannot fail.

use crate::core::transaction_log::TransactionLog;
use crate::types::{Account, AccountId, Balance, InvalidReason, LedgerError, Transaction};
use std::collections::{BTreeMap, HashMap};

/// Precomputed balances for one transaction, ready to commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceUpdate {
    balances: Vec<(AccountId, Balance)>,
}

impl BalanceUpdate {
    /// Accounts touched by the update with their post-commit balances
    pub fn balances(&self) -> &[(AccountId, Balance)] {
        &self.balances
    }
}

/// Per-account balances derived from accepted transactions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AccountIndex {
    /// Map of account ID to current balance
    ///
    /// An entry exists iff at least one accepted line references the account.
    balances: HashMap<AccountId, Balance>,
}

impl AccountIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an index by replaying every transaction in the log
    ///
    /// # Errors
    ///
    /// Returns `TransactionInvalid` with `BalanceOverflow` if a replayed
    /// transaction would overflow a balance, which cannot happen for a log
    /// built by the engine.
    pub fn from_log(log: &TransactionLog) -> Result<Self, LedgerError> {
        let mut index = Self::new();
        for tx in log.iter() {
            let update = index.prepare(tx)?;
            index.commit(update);
        }
        Ok(index)
    }

    /// Compute the balances `tx` would produce, without applying them
    ///
    /// Lines on the same account are netted first, so a transaction moving
    /// funds in and out of one account only overflows if its net effect does.
    pub fn prepare(&self, tx: &Transaction) -> Result<BalanceUpdate, LedgerError> {
        let mut net: BTreeMap<&str, i128> = BTreeMap::new();
        for line in &tx.lines {
            *net.entry(line.account_id.as_str()).or_insert(0) += i128::from(line.delta);
        }

        let mut balances = Vec::with_capacity(net.len());
        for (account, delta) in net {
            let current = i128::from(self.balances.get(account).copied().unwrap_or(0));
            let next = Balance::try_from(current + delta).map_err(|_| {
                LedgerError::transaction_invalid(
                    &tx.id,
                    InvalidReason::BalanceOverflow {
                        account: account.to_string(),
                    },
                )
            })?;
            balances.push((account.to_string(), next));
        }

        Ok(BalanceUpdate { balances })
    }

    /// Write a prepared update
    ///
    /// Accounts seen for the first time come into existence here.
    pub fn commit(&mut self, update: BalanceUpdate) {
        for (account, balance) in update.balances {
            self.balances.insert(account, balance);
        }
    }

    /// Get the current balance of an account
    pub fn balance(&self, account_id: &str) -> Option<Balance> {
        self.balances.get(account_id).copied()
    }

    /// Get an account snapshot
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no accepted line references the account.
    pub fn get(&self, account_id: &str) -> Result<Account, LedgerError> {
        self.balance(account_id)
            .map(|balance| Account::new(account_id, balance))
            .ok_or_else(|| LedgerError::account_not_found(account_id))
    }

    /// Get all accounts, sorted by identifier
    pub fn accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .balances
            .iter()
            .map(|(id, balance)| Account::new(id.clone(), *balance))
            .collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }

    /// Sum of every balance; zero for any index built from balanced transactions
    pub fn total(&self) -> i128 {
        self.balances.values().map(|&b| i128::from(b)).sum()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionLine;
    use rstest::rstest;

    fn tx(id: &str, lines: &[(&str, i64)]) -> Transaction {
        Transaction::new(
            id,
            lines
                .iter()
                .map(|(account, delta)| TransactionLine::new(*account, *delta))
                .collect(),
        )
    }

    fn apply(index: &mut AccountIndex, tx: &Transaction) -> Result<(), LedgerError> {
        let update = index.prepare(tx)?;
        index.commit(update);
        Ok(())
    }

    #[test]
    fn test_get_unknown_account() {
        let index = AccountIndex::new();
        assert_eq!(index.get("X"), Err(LedgerError::account_not_found("X")));
        assert!(index.is_empty());
    }

    #[test]
    fn test_apply_creates_accounts() {
        let mut index = AccountIndex::new();

        apply(&mut index, &tx("t1", &[("A", 1000), ("B", -1000)])).unwrap();

        assert_eq!(index.get("A"), Ok(Account::new("A", 1000)));
        assert_eq!(index.get("B"), Ok(Account::new("B", -1000)));
        assert_eq!(index.len(), 2);
        assert_eq!(index.total(), 0);
    }

    #[test]
    fn test_zero_net_line_still_creates_account() {
        let mut index = AccountIndex::new();

        apply(&mut index, &tx("t1", &[("A", 10), ("A", -10), ("B", 0)])).unwrap();

        assert_eq!(index.balance("A"), Some(0));
        assert_eq!(index.balance("B"), Some(0));
    }

    #[test]
    fn test_prepare_does_not_mutate() {
        let index = AccountIndex::new();

        let update = index.prepare(&tx("t1", &[("A", 5), ("B", -5)])).unwrap();

        assert!(index.is_empty());
        assert_eq!(
            update.balances(),
            &[("A".to_string(), 5), ("B".to_string(), -5)]
        );
    }

    #[test]
    fn test_prepare_nets_lines_per_account() {
        let mut index = AccountIndex::new();
        apply(&mut index, &tx("t1", &[("A", i64::MAX), ("B", -i64::MAX)])).unwrap();

        // +10 then -10 on a saturated account nets to zero and is fine
        let result = apply(&mut index, &tx("t2", &[("A", 10), ("A", -10)]));
        assert!(result.is_ok());
        assert_eq!(index.balance("A"), Some(i64::MAX));
    }

    #[rstest]
    #[case::positive_overflow(&[("A", 1), ("C", -1)], "A")]
    #[case::negative_overflow(&[("B", -2), ("C", 2)], "B")]
    fn test_prepare_rejects_overflow(#[case] lines: &[(&str, i64)], #[case] account: &str) {
        let mut index = AccountIndex::new();
        apply(&mut index, &tx("t1", &[("A", i64::MAX), ("B", -i64::MAX)])).unwrap();
        let before = index.clone();

        let result = apply(&mut index, &tx("t2", lines));

        assert_eq!(
            result,
            Err(LedgerError::transaction_invalid(
                "t2",
                InvalidReason::BalanceOverflow {
                    account: account.to_string()
                }
            ))
        );
        // No account touched, including the ones that would not overflow
        assert_eq!(index, before);
    }

    #[test]
    fn test_accounts_sorted_by_id() {
        let mut index = AccountIndex::new();
        apply(&mut index, &tx("t1", &[("c", 1), ("a", 2), ("b", -3)])).unwrap();

        let ids: Vec<String> = index.accounts().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_from_log_replays_all_entries() {
        let mut log = TransactionLog::new();
        log.append(tx("t1", &[("A", 100), ("B", -100)])).unwrap();
        log.append(tx("t2", &[("B", 40), ("C", -40)])).unwrap();

        let index = AccountIndex::from_log(&log).unwrap();

        assert_eq!(index.balance("A"), Some(100));
        assert_eq!(index.balance("B"), Some(-60));
        assert_eq!(index.balance("C"), Some(-40));
        assert_eq!(index.total(), 0);
    }
}
