use std::path::PathBuf;

use chrono::NaiveDateTime;
use scandate_fs::FileEntry;
use serde::Serialize;

use crate::error::FailureKind;

/// A file paired with the timestamp it will receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStamp {
    pub entry: FileEntry,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Succeeded { creation_applied: bool },
    Failed { kind: FailureKind, detail: String },
}

/// Result of stamping a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub path: PathBuf,
    pub name: String,
    pub sequence_index: usize,
    pub timestamp: NaiveDateTime,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl Outcome {
    pub fn succeeded(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded { .. })
    }

    pub fn error_detail(&self) -> Option<&str> {
        match &self.status {
            OutcomeStatus::Succeeded { .. } => None,
            OutcomeStatus::Failed { detail, .. } => Some(detail),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.status {
            OutcomeStatus::Succeeded { .. } => None,
            OutcomeStatus::Failed { kind, .. } => Some(*kind),
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<Outcome>,
    /// Files that were listed but not yet processed when cancellation hit.
    pub not_processed: usize,
    /// Directory entries that could not be inspected while listing.
    pub skipped: usize,
    pub cancelled: bool,
}

impl BatchReport {
    pub fn succeeded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.succeeded_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }
}
