//! Ledger engine
//!
//! This module provides the LedgerEngine that orchestrates transaction
//! acceptance by coordinating the validator, the TransactionLog, the
//! ConflictResolver and the AccountIndex.
//!
//! # Submission Flow
//!
//! ```text
//! Received ──validate──▶ Validated ──lookup id──┬─ not found ─▶ Fresh ─────────▶ Accepted (Applied)
//!     │                                         └─ found ─────▶ DuplicateCheck ─┬▶ Accepted (Duplicate)
//!     └─ invalid ─▶ Rejected (TransactionInvalid)                               └▶ Rejected (TransactionConflict)
//! ```
//!
//! Every rejection leaves both the log and the index untouched. On the fresh
//! path all fallible work (balance overflow checks, identifier reservation)
//! happens before the index is written, so a transaction is either fully
//! reflected or not at all.

use crate::core::account_index::AccountIndex;
use crate::core::conflict::{ConflictResolver, IdentityPolicy, Resolution};
use crate::core::query::TransactionQuery;
use crate::core::transaction_log::TransactionLog;
use crate::core::validator;
use crate::types::{Account, AccountId, CommitOutcome, LedgerError, Transaction};
use tracing::debug;

/// Engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    /// What counts as "the same transaction" on an identifier collision
    pub identity: IdentityPolicy,
}

/// Single-owner ledger engine
///
/// Owns the transaction log and the account index exclusively; nothing else
/// mutates them. Independent instances share no state.
#[derive(Debug, Default)]
pub struct LedgerEngine {
    log: TransactionLog,
    index: AccountIndex,
    resolver: ConflictResolver,
}

impl LedgerEngine {
    /// Create an empty engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with a custom configuration
    pub fn with_config(config: LedgerConfig) -> Self {
        LedgerEngine {
            log: TransactionLog::new(),
            index: AccountIndex::new(),
            resolver: ConflictResolver::new(config.identity),
        }
    }

    /// Submit a transaction
    ///
    /// # Returns
    ///
    /// * `Ok(CommitOutcome::Applied)` - fresh acceptance, log and balances updated
    /// * `Ok(CommitOutcome::Duplicate)` - identical retry, nothing changed
    ///
    /// # Errors
    ///
    /// * `TransactionInvalid` - structural failure or balance overflow
    /// * `TransactionConflict` - identifier already used with different content
    pub fn create_transaction(&mut self, tx: Transaction) -> Result<CommitOutcome, LedgerError> {
        validator::validate(&tx)?;
        self.commit_validated(tx)
    }

    /// Lookup-through-commit for a transaction that already passed validation
    ///
    /// Split out so that concurrent callers can validate outside their lock.
    pub(crate) fn commit_validated(
        &mut self,
        tx: Transaction,
    ) -> Result<CommitOutcome, LedgerError> {
        if let Some(stored) = self.log.get(&tx.id) {
            return match self.resolver.resolve(stored, &tx) {
                Resolution::Duplicate => {
                    debug!(tx = %tx.id, "duplicate submission ignored");
                    Ok(CommitOutcome::Duplicate)
                }
                Resolution::Conflict => Err(LedgerError::transaction_conflict(&tx.id)),
            };
        }

        let update = self.index.prepare(&tx)?;
        let sequence = self.log.append(tx)?;
        debug!(sequence, accounts = update.balances().len(), "transaction applied");
        self.index.commit(update);

        Ok(CommitOutcome::Applied)
    }

    /// Get the current snapshot of an account
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no accepted transaction references it.
    pub fn get_account(&self, account_id: &str) -> Result<Account, LedgerError> {
        self.index.get(account_id)
    }

    /// Get all accounts, sorted by identifier
    pub fn accounts(&self) -> Vec<Account> {
        self.index.accounts()
    }

    /// Get the authoritative stored transaction for an identifier
    pub fn get_transaction(&self, tx_id: &str) -> Option<&Transaction> {
        self.log.get(tx_id)
    }

    /// Accepted transactions matching `query`, in acceptance order
    pub fn search(&self, query: &TransactionQuery) -> Vec<Transaction> {
        self.log
            .iter()
            .filter(|tx| query.matches(tx))
            .cloned()
            .collect()
    }

    /// Number of accepted transactions
    pub fn transaction_count(&self) -> usize {
        self.log.len()
    }

    /// Replay the log and report accounts whose cached balance disagrees
    ///
    /// An empty result means the index is exactly the fold of the log.
    pub fn reconcile(&self) -> Result<Vec<AccountId>, LedgerError> {
        let replayed = AccountIndex::from_log(&self.log)?;

        let mut drifted: Vec<AccountId> = self
            .index
            .accounts()
            .into_iter()
            .filter(|account| replayed.balance(&account.id) != Some(account.balance))
            .map(|account| account.id)
            .chain(
                replayed
                    .accounts()
                    .into_iter()
                    .filter(|account| self.index.balance(&account.id).is_none())
                    .map(|account| account.id),
            )
            .collect();
        drifted.sort();
        drifted.dedup();

        Ok(drifted)
    }

    /// Sum of all balances; always zero
    pub fn total_balance(&self) -> i128 {
        self.index.total()
    }
}
