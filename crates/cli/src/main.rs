use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;
mod prompt;

use commands::Command;
use scandate_runtime::{PROGRAM_NAME, logging};

#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Give scanned photos ascending file dates in filename order",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Apply(args) => commands::apply::run(args),
        Command::Plan(args) => commands::plan::run(args),
    }
}
