//! Synchronous JSON Lines reader with iterator interface
//!
//! Provides a streaming iterator over transactions from a JSON Lines file.
//! Delegates record format concerns to the format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<Transaction, LedgerError>` for each non-blank record:
//!
//! ```no_run
//! use rust_ledger_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("transactions.jsonl")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(tx) => println!("Submitting transaction: {}", tx.id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Open failures (file not found, permissions) are returned from `new()`
//! - Malformed records, including lines that are not valid UTF-8, are
//!   yielded as `ParseError` and iteration continues
//! - A read failure is yielded once as `IoError` and ends the iteration
//! - Line numbers are included in error messages for debugging

use crate::io::format::parse_transaction_line;
use crate::types::{LedgerError, Transaction};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::Path;

/// Synchronous JSON Lines reader
///
/// Reads one line at a time; memory use is independent of file size.
#[derive(Debug)]
pub struct SyncReader {
    lines: Lines<BufReader<File>>,
    line_num: u64,
    failed: bool,
}

impl SyncReader {
    /// Open a JSON Lines file for streaming iteration
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened successfully
    /// * `Err(LedgerError::FileNotFound)` if the file does not exist
    /// * `Err(LedgerError::IoError)` for any other open failure
    pub fn new(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;

        Ok(Self {
            lines: BufReader::with_capacity(8 * 1024, file).lines(),
            line_num: 0,
            failed: false,
        })
    }
}

/// Map a file-open failure to the pipeline error taxonomy
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> LedgerError {
    if error.kind() == ErrorKind::NotFound {
        LedgerError::file_not_found(&path.display().to_string())
    } else {
        LedgerError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        }
    }
}

impl Iterator for SyncReader {
    type Item = Result<Transaction, LedgerError>;

    /// Get the next transaction, skipping blank and comment lines
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    self.line_num += 1;
                    return Some(Err(LedgerError::parse_error(self.line_num, &e.to_string())));
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(LedgerError::IoError {
                        message: format!("Failed to read line {}: {}", self.line_num + 1, e),
                    }));
                }
            };
            self.line_num += 1;

            match parse_transaction_line(&line, self.line_num) {
                Ok(Some(tx)) => return Some(Ok(tx)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
