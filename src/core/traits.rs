//! Core trait for ledger engines
//!
//! This module defines the trait abstraction that allows both the
//! single-owner and the thread-safe engine to be used interchangeably.

use crate::types::{Account, CommitOutcome, LedgerError, Transaction};

/// The two core operations of a ledger, plus a full balance listing
pub trait Ledger {
    /// Submit a transaction (idempotent on identical retries)
    fn create_transaction(&mut self, tx: Transaction) -> Result<CommitOutcome, LedgerError>;

    /// Read an account snapshot
    fn get_account(&self, account_id: &str) -> Result<Account, LedgerError>;

    /// Get all accounts for output, sorted by identifier
    fn accounts(&self) -> Vec<Account>;
}

impl Ledger for super::LedgerEngine {
    fn create_transaction(&mut self, tx: Transaction) -> Result<CommitOutcome, LedgerError> {
        super::LedgerEngine::create_transaction(self, tx)
    }

    fn get_account(&self, account_id: &str) -> Result<Account, LedgerError> {
        super::LedgerEngine::get_account(self, account_id)
    }

    fn accounts(&self) -> Vec<Account> {
        super::LedgerEngine::accounts(self)
    }
}

impl Ledger for super::AsyncLedgerEngine {
    fn create_transaction(&mut self, tx: Transaction) -> Result<CommitOutcome, LedgerError> {
        super::AsyncLedgerEngine::create_transaction(self, tx)
    }

    fn get_account(&self, account_id: &str) -> Result<Account, LedgerError> {
        super::AsyncLedgerEngine::get_account(self, account_id)
    }

    fn accounts(&self) -> Vec<Account> {
        super::AsyncLedgerEngine::accounts(self)
    }
}
