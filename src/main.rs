//! pharma-investigator CLI

use clap::Parser;

use pharma_investigator::cli::{init_logging, run_cli, Cli};

fn main() {
    let cli = Cli::parse();
    let guard = init_logging(cli.log_json);

    let code = run_cli(cli);

    // process::exit skips destructors; flush the log writer first
    drop(guard);
    std::process::exit(code);
}
