//! Processing strategy module for transaction processing
//!
//! This module defines the Strategy pattern for complete processing
//! pipelines, encompassing input parsing, ledger submission and balance
//! output. This allows different implementations (synchronous,
//! asynchronous batch) to be selected at runtime.

use crate::cli::StrategyType;
use crate::core::LedgerConfig;
use crate::types::{CommitOutcome, LedgerError};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete processing pipelines
///
/// Each strategy reads transactions from a JSON Lines file, submits them to a
/// ledger, and writes the final account balances to output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process transactions from input file and write balances to output
    ///
    /// # Returns
    ///
    /// * `Ok(ProcessingSummary)` once every record was handled; individual
    ///   rejections and malformed records are counted, not returned
    /// * `Err(LedgerError)` on a fatal error (input cannot be opened, output
    ///   cannot be written, runtime cannot start)
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError>;
}

/// Outcome counts for one processing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub applied: usize,
    pub duplicate: usize,
    pub invalid: usize,
    pub conflict: usize,
    pub malformed: usize,
}

impl ProcessingSummary {
    /// Count and log the result of one submission
    pub fn record(&mut self, tx: &str, result: &Result<CommitOutcome, LedgerError>) {
        match result {
            Ok(CommitOutcome::Applied) => {
                debug!(tx, "transaction applied");
                self.applied += 1;
            }
            Ok(CommitOutcome::Duplicate) => {
                info!(tx, "duplicate submission accepted without changes");
                self.duplicate += 1;
            }
            Err(e @ LedgerError::TransactionConflict { .. }) => {
                warn!(error = %e, "transaction rejected");
                self.conflict += 1;
            }
            Err(e) => {
                warn!(error = %e, "transaction rejected");
                self.invalid += 1;
            }
        }
    }

    /// Count a record that could not be parsed
    pub fn record_malformed(&mut self, error: &LedgerError) {
        warn!(error = %error, "skipping malformed record");
        self.malformed += 1;
    }

    /// Total number of records seen
    pub fn total(&self) -> usize {
        self.applied + self.duplicate + self.invalid + self.conflict + self.malformed
    }

    pub(crate) fn log(&self) {
        info!(
            applied = self.applied,
            duplicate = self.duplicate,
            invalid = self.invalid,
            conflict = self.conflict,
            malformed = self.malformed,
            "processing finished"
        );
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `batch` - Optional configuration for async batch processing (ignored for sync)
/// * `ledger` - Engine configuration shared by both strategies
pub fn create_strategy(
    strategy_type: StrategyType,
    batch: Option<BatchConfig>,
    ledger: LedgerConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(ledger)),
        StrategyType::Async => {
            let batch = batch.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(batch, ledger))
        }
    }
}
