//! `modwatchd` binary entry point.

use clap::Parser;

use modwatch::cli_app::{Cli, run};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("modwatchd: {err}");
        std::process::exit(1);
    }
}
