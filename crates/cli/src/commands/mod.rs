pub mod apply;
pub mod plan;
pub mod selection;

use std::process::ExitCode;

use clap::Subcommand;
use log::error;
use scandate_engine::AssignError;

pub use apply::ApplyArgs;
pub use plan::PlanArgs;

/// Request-level errors and bad arguments.
pub const EXIT_USAGE: u8 = 2;
/// The batch was interrupted by SIGINT/SIGTERM.
pub const EXIT_CANCELLED: u8 = 130;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stamp the files of a directory with ascending dates.
    ///
    /// Example:
    ///   scandate apply ~/scans --start "2024-01-01 10:00:00" --increment 1
    ///   scandate apply            (asks for the directory, start and increment)
    Apply(ApplyArgs),

    /// Show which date each file would get, without changing anything.
    ///
    /// Example:
    ///   scandate plan ~/scans --start "1998-07-14 09:00" --increment 5
    Plan(PlanArgs),
}

/// Shared error exit for subcommands.
pub fn fail(kind: &str, err: &anyhow::Error) -> ExitCode {
    error!("[{kind}] {err:#}");
    match err.downcast_ref::<AssignError>() {
        Some(AssignError::DirectoryNotFound { path, .. }) => {
            eprintln!("[error] {} is not a valid directory", path.display());
        }
        _ => eprintln!("[error] {err:#}"),
    }
    ExitCode::from(EXIT_USAGE)
}
