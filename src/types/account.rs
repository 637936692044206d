//! Account-related types for the ledger engine
//!
//! Accounts carry no independent state: a balance is a fold over the deltas
//! of every accepted transaction line that references the account.

use super::transaction::AccountId;
use serde::Serialize;

/// Account balance in the smallest currency unit
pub type Balance = i64;

/// Point-in-time snapshot of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// The account identifier
    pub id: AccountId,

    /// Sum of all deltas applied to this account
    ///
    /// May be negative: the engine tracks balances, it does not enforce
    /// overdraft rules.
    pub balance: Balance,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, balance: Balance) -> Self {
        Account {
            id: id.into(),
            balance,
        }
    }
}
