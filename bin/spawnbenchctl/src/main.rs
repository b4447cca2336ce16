//! ---
//! sb_section: "05-external-interfaces"
//! sb_subsection: "binary"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Control CLI running the process-launch benchmark."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use anyhow::Result;
use clap::{ArgAction, Parser};

mod run;

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Time serial versus concurrent launches of a target program",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print version information and exit"
    )]
    version: bool,
    #[command(flatten)]
    run: run::RunArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    run::execute(cli.run).await
}
