//! Rust Ledger Engine CLI
//!
//! Command-line interface for applying ledger transactions from JSON Lines
//! files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.jsonl > balances.csv
//! cargo run -- --strategy sync transactions.jsonl > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 transactions.jsonl > balances.csv
//! RUST_LOG=debug cargo run -- --log-format json transactions.jsonl > balances.csv
//! ```
//!
//! The final balances are written to stdout as `account,balance` CSV.
//! Logs, including one line per rejected transaction, go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success (rejected transactions do not affect the exit code)
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use rust_ledger_engine::cli;
use rust_ledger_engine::logging;
use rust_ledger_engine::strategy;
use std::process;
use tracing::error;

fn main() {
    let args = cli::parse_args();
    logging::init(args.log_format);

    let strategy = {
        let batch = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, batch, args.to_ledger_config())
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        error!(error = %e, "processing failed");
        process::exit(1);
    }
}
