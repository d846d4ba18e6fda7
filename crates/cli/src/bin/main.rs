use cpmconv_diagnostics::Result;

pub fn main() -> Result<()> {
    cpmconv_cli::run_cli()
}
