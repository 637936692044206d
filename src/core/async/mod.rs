//! Thread-safe implementations of core components
//!
//! This module provides the concurrent counterparts of the engine:
//!
//! - **AsyncLedgerEngine**: cloneable handle sharing one ledger behind a
//!   read/write lock
//! - **BatchProcessor**: commits batches on tokio tasks, partitioned by
//!   transaction identifier
//!
//! # Thread Safety
//!
//! - Submissions are serialized from identifier lookup through commit
//! - Reads run concurrently with each other and never observe a partially
//!   applied transaction
//! - Submissions with distinct identifiers are validated in parallel

pub mod batch_processor;
pub mod engine;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::AsyncLedgerEngine;
