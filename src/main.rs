// csvbump - operator manifest release bump
// Main CLI entry point

use anyhow::Context;
use clap::Parser;
use std::process;
use csvbump::cli::{Cli, CliDispatcher};
use csvbump::utils::error::UserError;

/// Log to stderr at the `-v` level unless `RUST_LOG` asks for something else
fn init_logging(level: log::LevelFilter) -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .try_init()
        .context("failed to initialise logger")
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.global.log_level()) {
        eprintln!("warning: {err:#}");
    }

    let result = CliDispatcher::execute(cli);

    if let Err(err) = result {
        let user_error = UserError::from_upgrade_error(&err);
        user_error.print();
        process::exit(user_error.exit_code);
    }
}
