//! Top-level CLI definition and dispatch.

use std::io;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::config::{ConfigSource, DEFAULT_CONFIG_PATH};
use crate::core::errors::Result;
use crate::core::snapshot::ConfigCell;
use crate::daemon::{lifecycle, loop_main, signals::SignalController};
use crate::logger::line::{DEFAULT_LOG_PATH, LineFileSink};
use crate::logger::sink::{EventSink, Severity, StderrSink};
use crate::scanner::TreeScanner;

/// modwatch — reports recently modified files under a watched directory tree.
#[derive(Parser)]
#[command(name = "modwatchd", version, about)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: std::path::PathBuf,

    /// Log file used once the daemon has detached (background runs only).
    #[arg(long, global = true, default_value = DEFAULT_LOG_PATH)]
    pub log_file: std::path::PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Daemonize and run the periodic scan loop in the background.
    Run,
    /// Run the scan loop in the foreground (used by systemd/launchd).
    Foreground,
    /// Validate the configuration file and exit.
    Check {
        /// Emit the validated configuration as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Dispatch CLI commands.
///
/// # Errors
/// Returns startup-fatal errors (unreadable/invalid configuration, failed
/// daemonization, failed listener setup); the binary maps them to a non-zero
/// exit.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Run => start(cli, true),
        Command::Foreground => start(cli, false),
        Command::Check { json } => check(cli, *json),
        Command::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(*shell, &mut command, "modwatchd", &mut io::stdout());
            Ok(())
        }
    }
}

/// Load and validate the configuration, then either report it or fail with
/// the loader's error.
fn check(cli: &Cli, json: bool) -> Result<()> {
    let source = ConfigSource::new(&cli.config);
    let config = source.load()?;
    if json {
        let payload = serde_json::json!({
            "config": source.path(),
            "period": config.period,
            "directory": config.directory,
            "valid": true,
        });
        println!("{payload}");
    } else {
        println!(
            "{}: ok (period={}, directory={})",
            source.path().display(),
            config.period,
            config.directory.display()
        );
    }
    Ok(())
}

/// Shared startup path for `run` and `foreground`.
///
/// Order matters: the configuration is validated first (a daemon with no
/// valid configuration never starts), then the process detaches, then the
/// sink and signal listener come up, then the loop runs forever.
fn start(cli: &Cli, detach: bool) -> Result<()> {
    let source = ConfigSource::new(&cli.config);
    let config = source.load()?;

    let sink: Arc<dyn EventSink> = if detach {
        lifecycle::enter_background()?;
        // Opened after the fork so the descriptor belongs to the child.
        Arc::new(LineFileSink::open(&cli.log_file)?)
    } else {
        Arc::new(StderrSink)
    };

    sink.emit(
        Severity::Info,
        &format!(
            "daemon started with period: {} and directory: {}",
            config.period,
            config.directory.display()
        ),
    );

    let cell = Arc::new(ConfigCell::new(config));
    let scanner = TreeScanner::new(Arc::clone(&cell), Arc::clone(&sink));

    let _controller =
        SignalController::spawn(Arc::clone(&cell), source, Arc::clone(&sink)).inspect_err(
            |err| sink.emit(Severity::Error, &format!("startup failed: {err}")),
        )?;

    loop_main::run(&cell, &scanner)
}
