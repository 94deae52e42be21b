//! Entry point: parses the CLI surface, initialises tracing, and hands the
//! resolved configuration to the renderer.

mod cli;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();
    run::run(cli.run)
}
