mod assigner;
mod error;
mod outcome;
mod request;
mod schedule;

pub use assigner::{Assigner, Plan, Progress, assign, plan};
pub use error::{AssignError, FailureKind};
pub use outcome::{BatchReport, Outcome, OutcomeStatus, PlannedStamp};
pub use request::{BatchRequest, CreationPolicy, Zone, now_start, parse_start};
pub use schedule::{batch_offset, timestamp_at, to_instant, to_system_time};

pub use scandate_fs::{ExtensionFilter, FileEntry, FsWriter, StampError, Stamped, TimestampWriter};
