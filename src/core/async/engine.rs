//! Thread-safe ledger engine for concurrent callers
//!
//! This module provides the `AsyncLedgerEngine`, a cloneable handle around a
//! single [`LedgerEngine`] that many threads or tasks can submit to and read
//! from at the same time.
//!
//! # Architecture
//!
//! ```text
//! AsyncLedgerEngine (Clone)
//!     └── Arc<RwLock<LedgerEngine>>
//!             ├── TransactionLog
//!             ├── AccountIndex
//!             └── ConflictResolver
//! ```
//!
//! # Locking
//!
//! - Validation is pure and runs before any lock is taken.
//! - `create_transaction` holds the write lock from the identifier lookup
//!   through the commit, so two submissions with the same identifier can
//!   never both observe "not found".
//! - Reads share the read lock and therefore only ever see whole
//!   transactions: a read never overlaps a commit.
//! - Nothing inside the critical section performs I/O.
//!
//! A poisoned lock is recovered rather than propagated: the engine never
//! mutates state before its last fallible step, so a panic inside the
//! critical section cannot leave a partial commit behind.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::engine::{LedgerConfig, LedgerEngine};
use crate::core::query::TransactionQuery;
use crate::core::validator;
use crate::types::{Account, AccountId, CommitOutcome, LedgerError, Transaction};

/// Shared, thread-safe ledger engine
///
/// Clones share the same ledger.
#[derive(Debug, Clone, Default)]
pub struct AsyncLedgerEngine {
    inner: Arc<RwLock<LedgerEngine>>,
}

impl AsyncLedgerEngine {
    /// Create an empty shared engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty shared engine with a custom configuration
    pub fn with_config(config: LedgerConfig) -> Self {
        Self::from_engine(LedgerEngine::with_config(config))
    }

    /// Share an existing engine
    pub fn from_engine(engine: LedgerEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerEngine> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerEngine> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Submit a transaction (thread-safe)
    ///
    /// Same contract as [`LedgerEngine::create_transaction`].
    pub fn create_transaction(&self, tx: Transaction) -> Result<CommitOutcome, LedgerError> {
        validator::validate(&tx)?;
        self.write().commit_validated(tx)
    }

    /// Read an account snapshot (thread-safe)
    pub fn get_account(&self, account_id: &str) -> Result<Account, LedgerError> {
        self.read().get_account(account_id)
    }

    /// Consistent snapshot of all accounts, sorted by identifier
    pub fn accounts(&self) -> Vec<Account> {
        self.read().accounts()
    }

    /// Get a copy of the stored transaction for an identifier
    pub fn get_transaction(&self, tx_id: &str) -> Option<Transaction> {
        self.read().get_transaction(tx_id).cloned()
    }

    /// Accepted transactions matching `query`, in acceptance order
    pub fn search(&self, query: &TransactionQuery) -> Vec<Transaction> {
        self.read().search(query)
    }

    pub fn transaction_count(&self) -> usize {
        self.read().transaction_count()
    }

    /// See [`LedgerEngine::reconcile`]
    pub fn reconcile(&self) -> Result<Vec<AccountId>, LedgerError> {
        self.read().reconcile()
    }

    pub fn total_balance(&self) -> i128 {
        self.read().total_balance()
    }
}
