//! jd-cli - Command line tool for junction dashboard data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "jd-cli",
    version,
    about = "Junction yield and flow availability toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: jd_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Running {:?}", cli.command);
    jd_cmd::run(cli.command)
}
