use clap::Parser as _;

use crate::{
    commands::{run_command, Cli},
    logging::init_tracing,
    output::print_json,
};

/// Run the QuadDB CLI application.
///
/// Parses the command line, initializes tracing, executes the requested
/// command and prints its JSON result to stdout.
pub fn run() -> quaddb::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.json, cli.verbose);

    let result = run_command(cli)?;
    print_json(&result)
}
