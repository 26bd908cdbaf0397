//! emap CLI - inspect the initial UI state and replay action logs.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "emap-cli",
    version,
    about = "Electricity map UI state toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: emap_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("starting emap-cli");
    emap_cmd::run(cli.command)
}
