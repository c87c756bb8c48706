use anyhow::Result;
use clap::Parser;

use codeblock::cli::{self, CliArgs};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    codeblock::tracing::init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run(&args, &mut out)
}
