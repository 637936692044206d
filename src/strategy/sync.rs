//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates processing by coordinating
//! between the SyncReader (for input) and the LedgerEngine (for business
//! logic).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - Input parsing to `SyncReader` (iterator interface)
//! - Transaction acceptance to `LedgerEngine`
//! - CSV output to `format::write_accounts_csv`
//!
//! Records are streamed one at a time; memory use is O(accepted
//! transactions), not O(file size).

use crate::core::{LedgerConfig, LedgerEngine};
use crate::io::format::write_accounts_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_ledger_engine::core::LedgerConfig;
/// use rust_ledger_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(LedgerConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("transactions.jsonl"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    ledger: LedgerConfig,
}

impl SyncProcessingStrategy {
    pub fn new(ledger: LedgerConfig) -> Self {
        Self { ledger }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process transactions from input file and write balances to output
    ///
    /// 1. Opens a SyncReader over the input file
    /// 2. Submits each record to a fresh LedgerEngine, in file order
    /// 3. Writes the final balances as CSV
    ///
    /// Fatal errors (file not found, read failures) are returned immediately
    /// and no output is written. Rejections and malformed records are logged
    /// and processing continues.
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError> {
        let mut engine = LedgerEngine::with_config(self.ledger);
        let reader = SyncReader::new(input_path)?;
        let mut summary = ProcessingSummary::default();

        for record in reader {
            match record {
                Ok(tx) => {
                    let id = tx.id.clone();
                    let result = engine.create_transaction(tx);
                    summary.record(&id, &result);
                }
                Err(e @ LedgerError::ParseError { .. }) => summary.record_malformed(&e),
                Err(e) => return Err(e),
            }
        }

        write_accounts_csv(&engine.accounts(), output)?;
        summary.log();

        Ok(summary)
    }
}
