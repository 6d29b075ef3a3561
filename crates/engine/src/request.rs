use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Timelike};
use scandate_fs::ExtensionFilter;
use scandate_runtime::START_FORMATS;

use crate::error::AssignError;

/// How the naive start date-time is anchored to an instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Zone {
    /// The machine's local time zone.
    #[default]
    Local,
    Utc,
}

/// What to do on platforms that cannot set a creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreationPolicy {
    /// Set access and modification time and report success.
    #[default]
    BestEffort,
    /// Record the file as failed with an unsupported attribute.
    Required,
}

/// One batch, validated and immutable.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    directory: PathBuf,
    start: NaiveDateTime,
    increment_minutes: u32,
    filter: Option<ExtensionFilter>,
    zone: Zone,
    creation: CreationPolicy,
}

impl BatchRequest {
    /// Build a request. A negative increment is rejected here, before any
    /// filesystem access.
    pub fn new(
        directory: impl Into<PathBuf>,
        start: NaiveDateTime,
        increment_minutes: i64,
    ) -> Result<Self, AssignError> {
        if increment_minutes < 0 {
            return Err(AssignError::invalid(format!(
                "increment must be non-negative, got {increment_minutes} minutes"
            )));
        }
        let increment_minutes = u32::try_from(increment_minutes).map_err(|_| {
            AssignError::invalid(format!("increment of {increment_minutes} minutes is too large"))
        })?;

        Ok(Self {
            directory: directory.into(),
            start,
            increment_minutes,
            filter: None,
            zone: Zone::default(),
            creation: CreationPolicy::default(),
        })
    }

    /// Restrict the batch to these extensions. An empty filter is treated
    /// as no filter.
    pub fn filter(mut self, filter: Option<ExtensionFilter>) -> Self {
        self.filter = filter.filter(|f| !f.is_empty());
        self
    }

    pub fn zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    pub fn creation(mut self, creation: CreationPolicy) -> Self {
        self.creation = creation;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn increment_minutes(&self) -> u32 {
        self.increment_minutes
    }

    pub fn file_filter(&self) -> Option<&ExtensionFilter> {
        self.filter.as_ref()
    }

    pub fn time_zone(&self) -> Zone {
        self.zone
    }

    pub fn creation_policy(&self) -> CreationPolicy {
        self.creation
    }
}

/// Parse a start date-time in any of the accepted forms.
pub fn parse_start(raw: &str) -> Result<NaiveDateTime, AssignError> {
    let raw = raw.trim();
    START_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| {
            AssignError::invalid(format!(
                "cannot parse start date-time {raw:?}, expected YYYY-MM-DD HH:MM:SS"
            ))
        })
}

/// Current local time truncated to whole seconds.
pub fn now_start() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
