use clap::Parser;

use ufd_decoder::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::run(cli)
}
