use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
};

use anyhow::{Result, bail};
use clap::Args;
use scandate_engine::{BatchRequest, ExtensionFilter, Zone, now_start, parse_start};
use scandate_runtime::{DEFAULT_INCREMENT_MINUTES, default_extensions, default_pick_dir};

use crate::prompt::{Defaults, Prompted, Prompter, Stop};

/// Result of resolving the selection.
#[derive(Debug)]
pub enum Selection {
    Ready(BatchRequest),
    /// The prompt ended without a request; nothing is processed.
    Stopped(Stop),
}

/// Which files to stamp and how. Shared by `apply` and `plan`.
#[derive(Debug, Args)]
pub struct SelectionArgs {
    /// Directory holding the scans. Asked for interactively when omitted.
    pub dir: Option<PathBuf>,

    /// Date-time of the first file, e.g. "2024-01-01 10:00:00" [default: now]
    #[arg(long, short = 's', value_name = "DATETIME")]
    pub start: Option<String>,

    /// Minutes between consecutive files
    #[arg(long, short = 'm', value_name = "MINUTES", allow_negative_numbers = true)]
    pub increment: Option<i64>,

    /// Comma separated extensions to include [default: common image formats]
    #[arg(long, value_name = "LIST", conflicts_with = "all_files")]
    pub ext: Option<String>,

    /// Include every regular file, whatever its extension
    #[arg(long)]
    pub all_files: bool,

    /// Read the start date-time as UTC instead of local time
    #[arg(long)]
    pub utc: bool,

    /// Ask for directory, start and increment even when stdin is not a terminal
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

impl SelectionArgs {
    pub fn file_filter(&self) -> Option<ExtensionFilter> {
        if self.all_files {
            return None;
        }
        match &self.ext {
            Some(raw) => Some(ExtensionFilter::parse(raw)),
            None => Some(ExtensionFilter::new(default_extensions())),
        }
    }

    fn zone(&self) -> Zone {
        if self.utc { Zone::Utc } else { Zone::Local }
    }

    fn increment(&self) -> i64 {
        self.increment
            .unwrap_or(i64::from(DEFAULT_INCREMENT_MINUTES))
    }

    /// Build the request from arguments, prompting on stdin when no
    /// directory was given.
    pub fn resolve(&self) -> Result<Selection> {
        if self.dir.is_none() && !self.interactive && !io::stdin().is_terminal() {
            bail!("no directory given; pass DIR or use --interactive");
        }
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stderr());
        self.resolve_with(&mut prompter)
    }

    pub fn resolve_with<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Selection> {
        let request = match &self.dir {
            Some(dir) => {
                let start = match &self.start {
                    Some(raw) => parse_start(raw)?,
                    None => now_start(),
                };
                BatchRequest::new(dir.clone(), start, self.increment())?
            }
            None => {
                let start = match &self.start {
                    Some(raw) => parse_start(raw)?,
                    None => now_start()
                        .date()
                        .and_hms_opt(0, 0, 0)
                        .unwrap_or_else(now_start),
                };
                let defaults = Defaults {
                    directory_hint: default_pick_dir(),
                    start,
                    increment_minutes: self.increment(),
                };
                let answers = match prompter.collect(&defaults)? {
                    Prompted::Answered(answers) => answers,
                    Prompted::Stopped(stop) => return Ok(Selection::Stopped(stop)),
                };
                BatchRequest::new(answers.directory, answers.start, answers.increment_minutes)?
            }
        };

        Ok(Selection::Ready(
            request.filter(self.file_filter()).zone(self.zone()),
        ))
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
