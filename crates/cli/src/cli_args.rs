use clap::Parser;
use cpmconv_converter::{ConvertSummary, ConvertTree};
use miette::Context;
use std::path::PathBuf;

/// Move the package versions of a project tree into one centrally managed
/// manifest.
#[derive(Debug, Parser)]
#[clap(name = "cpmconv")]
#[clap(bin_name = "cpmconv")]
#[clap(version)]
#[clap(about = "Convert a project tree to centrally managed package versions")]
pub struct CliArgs {
    /// Root of the project tree to convert.
    pub root: PathBuf,
}

impl CliArgs {
    /// Execute the command.
    pub fn run(self) -> miette::Result<()> {
        let CliArgs { root } = self;

        let ConvertSummary { scanned, rewritten, packages } =
            ConvertTree { root: &root }.run().wrap_err("converting the project tree")?;

        println!(
            "Converted {rewritten} of {scanned} project files, {packages} package versions recorded."
        );

        Ok(())
    }
}
