//! versionbump CLI entry point

use clap::Parser;
use env_logger::Env;
use std::process;
use versionbump::cli::{Cli, run_bump};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    process::exit(run_bump(&cli));
}
