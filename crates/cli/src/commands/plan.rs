use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use scandate_engine::plan;

use crate::commands::{
    apply::OutputOptions,
    fail,
    selection::{Selection, SelectionArgs},
};
use crate::printer::{RunContext, make_printer};

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: PlanArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => fail("plan", &e),
    }
}

fn execute(args: PlanArgs) -> Result<ExitCode> {
    let request = match args.selection.resolve()? {
        Selection::Ready(request) => request,
        Selection::Stopped(stop) => {
            println!("{stop}");
            return Ok(ExitCode::SUCCESS);
        }
    };

    let plan = plan(&request)?;

    let ctx = RunContext::new("plan", &request, plan.stamps.len(), plan.skipped);
    let mut printer = make_printer(args.output.printer_config());

    printer.begin(&ctx)?;
    for stamp in &plan.stamps {
        printer.print_planned(stamp, &ctx)?;
    }
    printer.finish(&ctx, None)?;

    Ok(ExitCode::SUCCESS)
}
