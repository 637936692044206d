//! I/O module
//!
//! Handles transaction input and account output.
//!
//! # Components
//!
//! - `format` - Record format handling (JSON Lines parsing, CSV output)
//! - `sync_reader` - Synchronous reader with iterator interface
//! - `async_reader` - Asynchronous reader with batch reading interface

pub mod async_reader;
pub mod format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use format::{parse_transaction_line, write_accounts_csv};
pub use sync_reader::SyncReader;
