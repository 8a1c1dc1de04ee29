//! Budget Ledger CLI
//!
//! Replays an operations CSV against a fresh ledger and prints a report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > budgets.csv
//! cargo run -- --strategy sync operations.csv > budgets.csv
//! cargo run -- --report transactions operations.csv > transactions.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 operations.csv
//! RUST_LOG=budget_ledger=debug cargo run -- operations.csv
//! ```
//!
//! Rejected operations and malformed rows are logged to stderr and skipped.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (input not found or unreadable, output not writable)

use budget_ledger::{cli, logging, strategy};
use std::process;

fn main() {
    let args = cli::parse_args();
    logging::init_tracing(&args.log_level);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config, args.report)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        tracing::error!(error = %e, "processing failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
