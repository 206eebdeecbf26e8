use tracing::error;

/// CLI module for command-line interface logic.
mod cli;
/// Commands module for subcommand implementations.
mod commands;
/// Configuration layering: defaults, TOML file, flags.
mod config;
/// Logging module for setting up tracing.
mod logging;
/// JSON rendering of command results.
mod output;

fn main() {
    if let Err(e) = cli::run() {
        error!("{}", e);
        #[allow(clippy::exit, reason = "non-zero exit status for the shell")]
        std::process::exit(1);
    }
}
