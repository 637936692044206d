//! Record format handling for transaction input and account output
//!
//! This module centralizes all format concerns, providing:
//! - Parsing of one JSON Lines record into a [`Transaction`]
//! - Account balance serialization as CSV
//!
//! All functions are pure (no I/O of their own) for easy testing.
//!
//! # Input Format
//!
//! One JSON object per line:
//!
//! ```text
//! {"id":"t1","lines":[{"account_id":"A","delta":100},{"account_id":"B","delta":-100}],"data":{"key":"val"}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::types::{Account, LedgerError, Transaction};
use std::io::Write;

/// Parse one input line
///
/// # Arguments
///
/// * `line` - The raw line, without its terminator
/// * `line_num` - One-based line number, used in error messages
///
/// # Returns
///
/// * `Ok(Some(Transaction))` - a parsed record
/// * `Ok(None)` - a blank or comment line
/// * `Err(LedgerError::ParseError)` - malformed JSON or wrong shape
pub fn parse_transaction_line(line: &str, line_num: u64) -> Result<Option<Transaction>, LedgerError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| LedgerError::parse_error(line_num, &e.to_string()))
}

/// Write account balances as CSV
///
/// Writes columns `account,balance`, sorted by account identifier for
/// deterministic output.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["account", "balance"])?;

    let mut sorted_accounts: Vec<&Account> = accounts.iter().collect();
    sorted_accounts.sort_by(|a, b| a.id.cmp(&b.id));

    for account in sorted_accounts {
        writer.write_record([account.id.clone(), account.balance.to_string()])?;
    }

    writer.flush()?;

    Ok(())
}
