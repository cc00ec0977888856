//! Farm CLI - render the cultivation dashboard in a terminal.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "farm-cli",
    version,
    about = "Farm cultivation dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: farm_cmd::Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("[farm] cli: version {}", env!("CARGO_PKG_VERSION"));
    farm_cmd::run(cli.command).await
}
