mod cli_args;

pub use cli_args::CliArgs;

use clap::Parser;
use cpmconv_diagnostics::enable_tracing_by_env;

/// Parse the command line arguments and run the requested conversion.
pub fn run_cli() -> miette::Result<()> {
    enable_tracing_by_env();
    CliArgs::parse().run()
}
