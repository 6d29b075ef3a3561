use std::{
    io::{self, Write},
    path::Path,
};

use chrono::NaiveDateTime;
use scandate_engine::{BatchReport, BatchRequest, Outcome, PlannedStamp, Progress};
use scandate_runtime::DISPLAY_FORMAT;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable progress lines and summary.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Configuration for printing a batch.
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    /// Print a line per file. The summary is always printed.
    pub show_rows: bool,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            show_rows: true,
        }
    }
}

/// Static context about a run.
#[derive(Debug)]
pub struct RunContext<'a> {
    /// Subcommand label, `apply` or `plan`
    pub kind: &'a str,
    pub directory: &'a Path,
    pub start: NaiveDateTime,
    pub increment_minutes: u32,
    /// Files selected for the batch
    pub total: usize,
    /// Directory entries that could not be inspected
    pub skipped: usize,
}

impl<'a> RunContext<'a> {
    pub fn new(kind: &'a str, request: &'a BatchRequest, total: usize, skipped: usize) -> Self {
        Self {
            kind,
            directory: request.directory(),
            start: request.start(),
            increment_minutes: request.increment_minutes(),
            total,
            skipped,
        }
    }
}

/// Output of a batch. `apply` streams outcomes, `plan` streams planned
/// stamps; both end with `finish`.
pub trait BatchPrinter {
    /// Called once before any row.
    fn begin(&mut self, ctx: &RunContext) -> io::Result<()>;

    /// Called for each stamped file; `done` is 1-based.
    fn print_outcome(&mut self, outcome: &Outcome, done: usize, ctx: &RunContext) -> io::Result<()>;

    /// Called for each file of a dry run.
    fn print_planned(&mut self, stamp: &PlannedStamp, ctx: &RunContext) -> io::Result<()>;

    /// Called once at the end. `report` is `None` for a dry run.
    fn finish(&mut self, ctx: &RunContext, report: Option<&BatchReport>) -> io::Result<()>;
}

pub fn make_printer(cfg: PrinterConfig) -> Box<dyn BatchPrinter> {
    match cfg.format {
        OutputFormat::Human => Box::new(HumanPrinter::new(io::stdout(), cfg)),
        OutputFormat::Json => Box::new(JsonPrinter::new(io::stdout(), cfg)),
    }
}

fn display(ts: NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        done as f64 * 100.0 / total as f64
    }
}

pub struct HumanPrinter<W: Write> {
    out: W,
    cfg: PrinterConfig,
}

impl<W: Write> HumanPrinter<W> {
    pub fn new(out: W, cfg: PrinterConfig) -> Self {
        Self { out, cfg }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BatchPrinter for HumanPrinter<W> {
    fn begin(&mut self, ctx: &RunContext) -> io::Result<()> {
        if ctx.total == 0 || !self.cfg.show_rows {
            return Ok(());
        }

        writeln!(
            self.out,
            "Found {} files in {}",
            ctx.total,
            ctx.directory.display()
        )?;
        writeln!(self.out, "Starting date: {}", display(ctx.start))?;
        writeln!(self.out, "Increment: {} minutes", ctx.increment_minutes)
    }

    fn print_outcome(&mut self, outcome: &Outcome, done: usize, ctx: &RunContext) -> io::Result<()> {
        if !self.cfg.show_rows {
            return Ok(());
        }

        let pct = percent(done, ctx.total);
        match outcome.error_detail() {
            None => writeln!(
                self.out,
                "[{pct:>5.1}%] updated {} -> {}",
                outcome.name,
                display(outcome.timestamp)
            ),
            Some(detail) => writeln!(self.out, "[{pct:>5.1}%] FAILED  {}: {detail}", outcome.name),
        }
    }

    fn print_planned(&mut self, stamp: &PlannedStamp, _ctx: &RunContext) -> io::Result<()> {
        if !self.cfg.show_rows {
            return Ok(());
        }
        writeln!(self.out, "{}  {}", display(stamp.timestamp), stamp.entry.name)
    }

    fn finish(&mut self, ctx: &RunContext, report: Option<&BatchReport>) -> io::Result<()> {
        if ctx.total == 0 {
            writeln!(
                self.out,
                "No matching files found in {}",
                ctx.directory.display()
            )?;
        }

        let Some(report) = report else {
            if ctx.total > 0 {
                writeln!(self.out, "\n{} files would be updated (dry run)", ctx.total)?;
            }
            if ctx.skipped > 0 {
                writeln!(self.out, "{} entries could not be read", ctx.skipped)?;
            }
            return Ok(());
        };

        if ctx.total > 0 {
            write!(
                self.out,
                "\n{} updated, {} failed",
                report.succeeded_count(),
                report.failed_count()
            )?;
            if report.skipped > 0 {
                write!(self.out, ", {} skipped", report.skipped)?;
            }
            writeln!(self.out)?;
        } else if report.skipped > 0 {
            writeln!(self.out, "{} entries could not be read", report.skipped)?;
        }

        if report.cancelled {
            writeln!(
                self.out,
                "Cancelled: {} files left unchanged",
                report.not_processed
            )?;
        }

        for failed in report.failures() {
            writeln!(
                self.out,
                "  {}: {}",
                failed.name,
                failed.error_detail().unwrap_or_default()
            )?;
        }

        Ok(())
    }
}

pub struct JsonPrinter<W: Write> {
    out: W,
    cfg: PrinterConfig,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W, cfg: PrinterConfig) -> Self {
        Self { out, cfg }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BatchPrinter for JsonPrinter<W> {
    fn begin(&mut self, _ctx: &RunContext) -> io::Result<()> {
        Ok(())
    }

    fn print_outcome(&mut self, outcome: &Outcome, _done: usize, _ctx: &RunContext) -> io::Result<()> {
        if !self.cfg.show_rows {
            return Ok(());
        }

        let mut obj = serde_json::to_value(outcome).map_err(io::Error::other)?;
        if let Some(map) = obj.as_object_mut() {
            map.insert("type".into(), "outcome".into());
        }
        writeln!(self.out, "{}", obj)
    }

    fn print_planned(&mut self, stamp: &PlannedStamp, _ctx: &RunContext) -> io::Result<()> {
        if !self.cfg.show_rows {
            return Ok(());
        }

        let obj = serde_json::json!({
            "type": "planned",
            "path": stamp.entry.path,
            "name": stamp.entry.name,
            "sequence_index": stamp.entry.sequence_index,
            "timestamp": stamp.timestamp,
        });
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &RunContext, report: Option<&BatchReport>) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "summary",
            "kind": ctx.kind,
            "directory": ctx.directory,
            "start": ctx.start,
            "increment_minutes": ctx.increment_minutes,
            "total": ctx.total,
            "skipped": ctx.skipped,
            "succeeded": report.map(BatchReport::succeeded_count),
            "failed": report.map(BatchReport::failed_count),
            "not_processed": report.map(|r| r.not_processed),
            "cancelled": report.is_some_and(|r| r.cancelled),
        });
        writeln!(self.out, "{}", obj)
    }
}

/// Feeds outcomes from the assigner into a printer as they happen.
///
/// The first write error is kept and later rows are dropped; stamping
/// itself continues.
pub struct PrinterProgress<'p, 'c> {
    printer: &'p mut dyn BatchPrinter,
    ctx: &'c RunContext<'c>,
    error: Option<io::Error>,
}

impl<'p, 'c> PrinterProgress<'p, 'c> {
    pub fn new(printer: &'p mut dyn BatchPrinter, ctx: &'c RunContext<'c>) -> Self {
        Self {
            printer,
            ctx,
            error: None,
        }
    }

    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Progress for PrinterProgress<'_, '_> {
    fn on_outcome(&mut self, outcome: &Outcome, done: usize, _total: usize) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.printer.print_outcome(outcome, done, self.ctx) {
            self.error = Some(e);
        }
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
