//! Folio CLI Binary

use anyhow::Context;
use clap::Parser;
use folio::logging::init_logging;
use folio::tooling::cli::{Cli, CliContext};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut context =
        CliContext::new(cli.config.clone()).context("Error loading configuration")?;
    cli.apply_logging_overrides(&mut context.config_mut().logging);
    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let output = context.execute(&cli.command)?;
    println!("{}", output.trim_end());
    Ok(())
}
