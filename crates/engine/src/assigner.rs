use std::{
    fs,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use log::{debug, info, warn};
use scandate_fs::{FsWriter, StampError, TimestampWriter, list_dir};

use crate::{
    error::{AssignError, FailureKind},
    outcome::{BatchReport, Outcome, OutcomeStatus, PlannedStamp},
    request::{BatchRequest, CreationPolicy},
    schedule::{batch_offset, check_range, timestamp_at, to_system_time},
};

/// Receives each outcome as soon as it is known.
pub trait Progress {
    /// `done` counts processed files including this one, out of `total`.
    fn on_outcome(&mut self, outcome: &Outcome, done: usize, total: usize);
}

impl Progress for () {
    fn on_outcome(&mut self, _outcome: &Outcome, _done: usize, _total: usize) {}
}

/// The schedule for a batch, computed without touching any file.
#[derive(Debug, Default)]
pub struct Plan {
    pub stamps: Vec<PlannedStamp>,
    pub skipped: usize,
}

/// List, sort and schedule the files of `request`.
pub fn plan(request: &BatchRequest) -> Result<Plan, AssignError> {
    let dir = request.directory();

    let not_found = |source| AssignError::DirectoryNotFound {
        path: dir.to_path_buf(),
        source,
    };

    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(not_found(None)),
        Err(e) => return Err(not_found(Some(e))),
    }

    let listing = list_dir(dir, request.file_filter()).map_err(|e| not_found(Some(e)))?;

    let start = request.start();
    let increment = request.increment_minutes();
    check_range(start, increment, listing.entries.len())?;

    let stamps = listing
        .entries
        .into_iter()
        .map(|entry| {
            let timestamp = timestamp_at(start, increment, entry.sequence_index)
                .ok_or_else(|| AssignError::invalid("timestamp out of calendar range"))?;
            Ok(PlannedStamp { entry, timestamp })
        })
        .collect::<Result<Vec<_>, AssignError>>()?;

    Ok(Plan {
        stamps,
        skipped: listing.skipped,
    })
}

/// Applies a [`Plan`] through a [`TimestampWriter`].
pub struct Assigner<W: TimestampWriter> {
    writer: W,
    cancel: Option<Arc<AtomicBool>>,
}

impl Assigner<FsWriter> {
    pub fn on_filesystem() -> Self {
        Self::new(FsWriter)
    }
}

impl<W: TimestampWriter> Assigner<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            cancel: None,
        }
    }

    /// Stop before the next file once `flag` is set. Files already stamped
    /// stay stamped.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Run the whole batch. Only request-level problems return `Err`;
    /// per-file problems become failed outcomes.
    pub fn run(
        &mut self,
        request: &BatchRequest,
        progress: &mut dyn Progress,
    ) -> Result<BatchReport, AssignError> {
        let plan = plan(request)?;
        Ok(self.apply(request, plan, progress))
    }

    /// Stamp the files of an already computed plan. `request` supplies the
    /// zone and creation policy; it must be the one `plan` came from.
    pub fn apply(
        &mut self,
        request: &BatchRequest,
        plan: Plan,
        progress: &mut dyn Progress,
    ) -> BatchReport {
        let total = plan.stamps.len();

        info!(
            "[assign] {} files in {:?} from {} every {} min ({} skipped)",
            total,
            request.directory(),
            request.start(),
            request.increment_minutes(),
            plan.skipped
        );

        let mut report = BatchReport {
            outcomes: Vec::with_capacity(total),
            skipped: plan.skipped,
            ..BatchReport::default()
        };
        let mut warned_creation = false;
        let offset = batch_offset(request.start(), request.time_zone());

        for (done, stamp) in plan.stamps.into_iter().enumerate() {
            if self.cancelled() {
                report.cancelled = true;
                report.not_processed = total - done;
                info!("[assign] cancelled with {} files left", report.not_processed);
                break;
            }

            let at = to_system_time(stamp.timestamp, offset);
            let status = match self.writer.stamp(&stamp.entry.path, at) {
                Ok(stamped) if stamped.creation_applied => OutcomeStatus::Succeeded {
                    creation_applied: true,
                },
                Ok(_) => match request.creation_policy() {
                    CreationPolicy::BestEffort => {
                        if !warned_creation {
                            warn!("[assign] creation time cannot be set on this platform; only access and modification times are changed");
                            warned_creation = true;
                        }
                        OutcomeStatus::Succeeded {
                            creation_applied: false,
                        }
                    }
                    CreationPolicy::Required => failed(StampError::Unsupported {
                        attribute: "creation time",
                    }),
                },
                Err(e) => failed(e),
            };

            let outcome = Outcome {
                path: stamp.entry.path,
                name: stamp.entry.name,
                sequence_index: stamp.entry.sequence_index,
                timestamp: stamp.timestamp,
                status,
            };

            match outcome.error_detail() {
                None => debug!("[assign] {} -> {}", outcome.name, outcome.timestamp),
                Some(detail) => warn!("[assign] {}: {detail}", outcome.name),
            }

            progress.on_outcome(&outcome, done + 1, total);
            report.outcomes.push(outcome);
        }

        report
    }
}

fn failed(err: StampError) -> OutcomeStatus {
    let kind = match err {
        StampError::Unsupported { .. } => FailureKind::UnsupportedAttribute,
        StampError::Vanished | StampError::PermissionDenied { .. } | StampError::Io { .. } => {
            FailureKind::FileAccess
        }
    };

    OutcomeStatus::Failed {
        kind,
        detail: err.to_string(),
    }
}

/// Stamp every file of `request` on the real filesystem.
pub fn assign(request: &BatchRequest) -> Result<Vec<Outcome>, AssignError> {
    Assigner::on_filesystem()
        .run(request, &mut ())
        .map(|report| report.outcomes)
}

#[cfg(test)]
#[path = "assigner_tests.rs"]
mod tests;
