//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It submits transactions in batches using
//! thread-based parallelism with identifier-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch JSON Lines reading)
//!     ├── BatchProcessor (identifier partitioning + tasks)
//!     └── AsyncLedgerEngine (shared, lock-guarded LedgerEngine)
//! ```
//!
//! # Ordering
//!
//! - Batches are processed sequentially, so a resubmission is always judged
//!   against every earlier line of the file
//! - Within a batch, submissions sharing an identifier run in file order on
//!   one task; distinct identifiers run in parallel
//! - Final balances are sums of accepted deltas, so they do not depend on the
//!   interleaving of distinct identifiers (overflow rejections aside)

use crate::core::r#async::{AsyncLedgerEngine, BatchProcessor};
use crate::core::LedgerConfig;
use crate::io::async_reader::AsyncReader;
use crate::io::format::write_accounts_csv;
use crate::io::sync_reader::open_error;
use crate::strategy::{ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for batch processing
///
/// Controls how transactions are batched and the number of worker threads
/// for parallel processing within each batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of transactions per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid concurrency, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Reads transactions in batches and processes them batch-by-batch. Within
/// each batch, submissions are partitioned by transaction identifier and
/// committed in parallel into one shared `AsyncLedgerEngine`.
///
/// Produces the same balances as `SyncProcessingStrategy` unless a balance
/// would overflow.
#[derive(Debug, Clone, Copy)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    ledger: LedgerConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, ledger: LedgerConfig) -> Self {
        Self { config, ledger }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process transactions from input file and write balances to output
    ///
    /// 1. Starts a multi-threaded tokio runtime
    /// 2. Reads transactions in batches with AsyncReader
    /// 3. Processes each batch to completion before reading the next
    /// 4. Writes the final balances as CSV
    ///
    /// Fatal errors (file not found, read failures, runtime errors, failed
    /// tasks) are returned immediately and no output is written. Rejections
    /// and malformed records are logged and counted.
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(async {
            let engine = AsyncLedgerEngine::with_config(self.ledger);
            let processor = BatchProcessor::new(engine.clone());
            let mut summary = ProcessingSummary::default();

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| open_error(input_path, e))?;
            let mut reader = AsyncReader::new(tokio::io::BufReader::new(file));

            loop {
                let (batch, malformed) = reader.read_batch(self.config.batch_size).await?;
                summary.malformed += malformed;

                if batch.is_empty() {
                    break;
                }

                debug!(size = batch.len(), line = reader.line_num(), "processing batch");
                for outcome in processor.process_batch(batch).await? {
                    summary.record(&outcome.tx, &outcome.result);
                }
            }

            write_accounts_csv(&engine.accounts(), output)?;
            summary.log();

            Ok(summary)
        })
    }
}
