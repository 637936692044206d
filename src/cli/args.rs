use crate::core::{IdentityPolicy, LedgerConfig};
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Apply balanced ledger transactions and report account balances
#[derive(Parser, Debug)]
#[command(name = "ledger-engine")]
#[command(about = "Apply balanced ledger transactions and report account balances", long_about = None)]
pub struct CliArgs {
    /// Input JSON Lines file containing transaction records
    #[arg(value_name = "INPUT", help = "Path to the input JSON Lines file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for submitting transactions
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of transactions per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of transactions per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Treat metadata as part of a transaction's identity on resubmission
    #[arg(
        long = "match-metadata",
        help = "Reject resubmissions whose metadata differs as conflicts"
    )]
    pub match_metadata: bool,

    /// Log output format
    #[arg(
        long = "log-format",
        value_name = "FORMAT",
        default_value = "pretty",
        help = "Log format on stderr: 'pretty' or 'json'"
    )]
    pub log_format: LogFormat,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available log formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Unset values fall back to defaults; zero values are replaced with
    /// defaults and a warning is logged.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn to_ledger_config(&self) -> LedgerConfig {
        let identity = if self.match_metadata {
            IdentityPolicy::LinesAndMetadata
        } else {
            IdentityPolicy::LinesOnly
        };
        LedgerConfig { identity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program", "input.jsonl"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "input.jsonl"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "input.jsonl"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::batch_size(&["program", "--batch-size", "2000", "input.jsonl"], Some(2000), None)]
    #[case::max_concurrent(&["program", "--max-concurrent", "8", "input.jsonl"], None, Some(8))]
    #[case::no_options(&["program", "input.jsonl"], None, None)]
    #[case::all_options(
        &["program", "--strategy", "async", "--batch-size", "2000", "--max-concurrent", "8", "input.jsonl"],
        Some(2000),
        Some(8)
    )]
    fn test_config_options(
        #[case] args: &[&str],
        #[case] batch_size: Option<usize>,
        #[case] max_concurrent: Option<usize>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.batch_size, batch_size);
        assert_eq!(parsed.max_concurrent_batches, max_concurrent);
    }

    #[rstest]
    #[case::all_defaults(&["program", "input.jsonl"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "--batch-size", "2000", "input.jsonl"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "--max-concurrent", "8", "input.jsonl"], 1000, 8)]
    #[case::zero_batch_size(&["program", "--batch-size", "0", "input.jsonl"], 1000, num_cpus::get())]
    #[case::zero_max_concurrent(&["program", "--max-concurrent", "0", "input.jsonl"], 1000, num_cpus::get())]
    fn test_batch_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_batch_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[rstest]
    #[case::lines_only(&["program", "input.jsonl"], IdentityPolicy::LinesOnly)]
    #[case::with_metadata(&["program", "--match-metadata", "input.jsonl"], IdentityPolicy::LinesAndMetadata)]
    fn test_ledger_config_conversion(#[case] args: &[&str], #[case] expected: IdentityPolicy) {
        let config = CliArgs::try_parse_from(args).unwrap().to_ledger_config();
        assert_eq!(config.identity, expected);
    }

    #[rstest]
    #[case::default_pretty(&["program", "input.jsonl"], LogFormat::Pretty)]
    #[case::json(&["program", "--log-format", "json", "input.jsonl"], LogFormat::Json)]
    fn test_log_format_parsing(#[case] args: &[&str], #[case] expected: LogFormat) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_format, expected);
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "input.jsonl"])]
    #[case::invalid_log_format(&["program", "--log-format", "xml", "input.jsonl"])]
    #[case::non_numeric_batch(&["program", "--batch-size", "many", "input.jsonl"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
