//! Batch processing with identifier-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which commits a batch of
//! submissions concurrently while keeping submissions that share a
//! transaction identifier in their input order.
//!
//! # Design
//!
//! Only submissions with the same identifier interact (retry or conflict),
//! and balance updates commute, so partitioning by identifier yields the same
//! final balances as sequential processing. The exception is a transaction
//! rejected for balance overflow, which depends on what committed before it
//! in the same batch. Each partition runs on its own
//! tokio task against the shared [`AsyncLedgerEngine`].
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── AsyncLedgerEngine  (shared, Arc<RwLock<LedgerEngine>>)
//! ```

use std::collections::HashMap;

use futures::future::join_all;
use tokio::task::JoinError;
use tracing::error;

use super::AsyncLedgerEngine;
use crate::types::{CommitOutcome, LedgerError, Transaction, TransactionId};

/// Result of processing a single submission
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Identifier of the submitted transaction
    pub tx: TransactionId,

    /// The outcome of the submission
    pub result: Result<CommitOutcome, LedgerError>,
}

/// Batch processor with identifier-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: AsyncLedgerEngine,
}

impl BatchProcessor {
    /// Create a new BatchProcessor committing into `engine`
    pub fn new(engine: AsyncLedgerEngine) -> Self {
        Self { engine }
    }

    /// Partition a batch by transaction identifier
    ///
    /// # Guarantees
    ///
    /// - Each submission appears in exactly one partition
    /// - Submissions sharing an identifier keep their original order
    pub fn partition_by_id(
        &self,
        batch: Vec<Transaction>,
    ) -> HashMap<TransactionId, Vec<Transaction>> {
        let mut partitions: HashMap<TransactionId, Vec<Transaction>> = HashMap::new();

        for tx in batch {
            partitions.entry(tx.id.clone()).or_default().push(tx);
        }

        partitions
    }

    /// Commit one partition sequentially, in order
    ///
    /// Errors are captured in the results and don't stop processing.
    pub async fn process_partition(&self, transactions: Vec<Transaction>) -> Vec<ProcessingResult> {
        transactions
            .into_iter()
            .map(|tx| {
                let id = tx.id.clone();
                ProcessingResult {
                    tx: id,
                    result: self.engine.create_transaction(tx),
                }
            })
            .collect()
    }

    /// Process a batch with identifier-based partitioning
    ///
    /// 1. Partitions the batch by transaction identifier
    /// 2. Spawns a tokio task per partition
    /// 3. Waits for all tasks and collects their results
    ///
    /// Results may come back in a different order than the input.
    ///
    /// # Errors
    ///
    /// `TaskFailed` if a partition task panicked or was cancelled. Its
    /// submissions have no recorded outcome, so the batch cannot be reported
    /// as complete.
    pub async fn process_batch(
        &self,
        batch: Vec<Transaction>,
    ) -> Result<Vec<ProcessingResult>, LedgerError> {
        let partitions = self.partition_by_id(batch);

        let tasks = partitions.into_values().map(|transactions| {
            let processor = self.clone();
            tokio::spawn(async move { processor.process_partition(transactions).await })
        });

        collect_results(join_all(tasks).await)
    }
}

fn collect_results(
    joined: Vec<Result<Vec<ProcessingResult>, JoinError>>,
) -> Result<Vec<ProcessingResult>, LedgerError> {
    let mut results = Vec::new();
    for partition in joined {
        match partition {
            Ok(partition_results) => results.extend(partition_results),
            Err(e) => {
                error!(error = %e, "batch task failed");
                return Err(LedgerError::task_failed(&e.to_string()));
            }
        }
    }

    Ok(results)
}
