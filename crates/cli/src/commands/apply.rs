use std::{
    process::ExitCode,
    sync::{Arc, atomic::AtomicBool},
};

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use scandate_engine::{Assigner, CreationPolicy, plan};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

use crate::commands::{
    EXIT_CANCELLED, fail,
    selection::{Selection, SelectionArgs},
};
use crate::printer::{OutputFormat, PrinterConfig, PrinterProgress, RunContext, make_printer};

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// Print only the summary
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn printer_config(&self) -> PrinterConfig {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        PrinterConfig {
            format,
            show_rows: !self.quiet,
        }
    }
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Fail files whose creation time cannot be set, instead of setting
    /// only access and modification time
    #[arg(long)]
    pub require_creation: bool,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: ApplyArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => fail("apply", &e),
    }
}

fn execute(args: ApplyArgs) -> Result<ExitCode> {
    let request = match args.selection.resolve()? {
        Selection::Ready(request) => request,
        Selection::Stopped(stop) => {
            println!("{stop}");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let creation = if args.require_creation {
        CreationPolicy::Required
    } else {
        CreationPolicy::BestEffort
    };
    let request = request.creation(creation);

    let plan = plan(&request)?;

    // Handlers only set the flag; the assigner checks it between files.
    let cancel = Arc::new(AtomicBool::new(false));
    for sig in [SIGINT, SIGTERM] {
        flag::register(sig, Arc::clone(&cancel))
            .with_context(|| format!("Failed to register signal handler for {sig}"))?;
    }

    let ctx = RunContext::new("apply", &request, plan.stamps.len(), plan.skipped);
    let mut printer = make_printer(args.output.printer_config());
    printer.begin(&ctx)?;

    let mut assigner = Assigner::on_filesystem().with_cancel(cancel);
    let report = {
        let mut progress = PrinterProgress::new(printer.as_mut(), &ctx);
        let report = assigner.apply(&request, plan, &mut progress);
        progress.finish()?;
        report
    };

    printer.finish(&ctx, Some(&report))?;

    info!(
        "[apply] {} succeeded, {} failed, {} skipped",
        report.succeeded_count(),
        report.failed_count(),
        report.skipped
    );

    if report.cancelled {
        Ok(ExitCode::from(EXIT_CANCELLED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
