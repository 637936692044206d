//! Asynchronous JSON Lines reader with batch interface
//!
//! Provides batch reading of transactions from any tokio `AsyncBufRead`
//! source, for the batched processing strategy.
//!
//! # Architecture
//!
//! ```text
//! AsyncBufRead → AsyncReader → Batches of Transactions
//!                    ↓
//!              format module
//!        (parse_transaction_line)
//! ```

use crate::io::format::parse_transaction_line;
use crate::types::{LedgerError, Transaction};
use std::io::ErrorKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

/// Asynchronous JSON Lines reader
#[derive(Debug)]
pub struct AsyncReader<R> {
    lines: Lines<R>,
    line_num: u64,
    finished: bool,
}

impl<R: AsyncBufRead + Unpin> AsyncReader<R> {
    /// Create a new AsyncReader over a buffered async source
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
            finished: false,
        }
    }

    /// Number of the last line read
    pub fn line_num(&self) -> u64 {
        self.line_num
    }

    /// Read a batch of transactions
    ///
    /// Reads up to `batch_size` records. Malformed records, including lines
    /// that are not valid UTF-8, are logged and skipped.
    ///
    /// # Returns
    ///
    /// * `Ok((batch, malformed))` - the parsed transactions and the number of
    ///   malformed records skipped while filling the batch. An empty batch
    ///   means end of input.
    /// * `Err(LedgerError::IoError)` - the source failed; nothing after the
    ///   failure can be trusted
    pub async fn read_batch(
        &mut self,
        batch_size: usize,
    ) -> Result<(Vec<Transaction>, usize), LedgerError> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut malformed = 0;

        while !self.finished && batch.len() < batch_size {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    self.line_num += 1;
                    match parse_transaction_line(&line, self.line_num) {
                        Ok(Some(tx)) => batch.push(tx),
                        Ok(None) => {}
                        Err(e) => {
                            warn!(error = %e, "skipping malformed record");
                            malformed += 1;
                        }
                    }
                }
                Ok(None) => self.finished = true,
                // The offending line has been consumed; the next read starts after it
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    self.line_num += 1;
                    let error = LedgerError::parse_error(self.line_num, &e.to_string());
                    warn!(error = %error, "skipping malformed record");
                    malformed += 1;
                }
                Err(e) => {
                    self.finished = true;
                    return Err(LedgerError::IoError {
                        message: format!("Failed to read line {}: {}", self.line_num + 1, e),
                    });
                }
            }
        }

        Ok((batch, malformed))
    }
}
