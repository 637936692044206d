//! Filtering over accepted transactions
//!
//! A fixed conjunction of exact-match filters. Every filter left unset
//! matches everything.

use crate::types::Transaction;
use serde_json::Value;

/// Filter over accepted transactions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    id: Option<String>,
    account: Option<String>,
    data: Vec<(String, Value)>,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match the transaction with this exact identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Match transactions with at least one line on this account
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Match transactions whose metadata holds exactly this value under `key`
    ///
    /// May be called repeatedly; all pairs must match.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(id) = &self.id {
            if &tx.id != id {
                return false;
            }
        }

        if let Some(account) = &self.account {
            if !tx.touches(account) {
                return false;
            }
        }

        self.data
            .iter()
            .all(|(key, value)| tx.data.get(key) == Some(value))
    }
}
