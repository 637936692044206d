//! Structural validation of submitted transactions
//!
//! Validation is a pure function of the submitted transaction. Checks run in
//! a fixed order and the first failure is reported:
//!
//! 1. The transaction identifier is non-empty
//! 2. At least one line is present
//! 3. Every line names an account
//! 4. The deltas sum to exactly zero
//!
//! Balance overflow depends on ledger state and is checked at commit time by
//! the account index, not here.

use crate::types::{InvalidReason, LedgerError, Transaction};

/// Validate a transaction before it reaches the log
///
/// # Returns
///
/// * `Ok(())` if the transaction is well-formed and balanced
/// * `Err(LedgerError::TransactionInvalid)` naming the first failed check
pub fn validate(tx: &Transaction) -> Result<(), LedgerError> {
    check(tx).map_err(|reason| LedgerError::transaction_invalid(&tx.id, reason))
}

fn check(tx: &Transaction) -> Result<(), InvalidReason> {
    if tx.id.is_empty() {
        return Err(InvalidReason::MissingTransactionId);
    }

    if tx.lines.is_empty() {
        return Err(InvalidReason::NoLines);
    }

    if let Some(line) = tx.lines.iter().position(|l| l.account_id.is_empty()) {
        return Err(InvalidReason::MissingAccountId { line });
    }

    // i128 cannot overflow on a sum of i64 values for any realistic line count
    let sum: i128 = tx.lines.iter().map(|l| i128::from(l.delta)).sum();
    if sum != 0 {
        return Err(InvalidReason::Unbalanced { sum });
    }

    Ok(())
}
