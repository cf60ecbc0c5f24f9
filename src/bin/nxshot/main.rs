mod cli;
mod config;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Organize Nintendo Switch captures into per-game directories"
)]
pub struct Args {
    /// Optional input directory with capture files
    #[arg(value_hint = clap::ValueHint::DirPath)]
    path: Option<PathBuf>,

    /// Extend the bundled game id catalog from a JSON file
    #[arg(short, long, name = "FILE", value_hint = clap::ValueHint::FilePath)]
    catalog: Option<PathBuf>,

    /// Print debug information
    #[arg(short = 'D', long)]
    debug: bool,

    /// Only print what would be organized without copying
    #[arg(short, long)]
    print: bool,

    /// Skip captures that already exist in the output directory
    #[arg(short, long)]
    skip_existing: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(shell) = args.completion {
        nxshot::generate_shell_completion(shell, Args::command(), env!("CARGO_BIN_NAME"));
        Ok(())
    } else {
        let config = Config::try_from_args(&args)?;
        cli::run(config)
    }
}
