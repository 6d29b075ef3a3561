use std::{
    fs, io,
    path::Path,
    time::SystemTime,
};

use log::trace;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StampError {
    #[error("file vanished before its timestamps could be set")]
    Vanished,

    #[error("permission denied while setting {attribute}")]
    PermissionDenied {
        attribute: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("filesystem does not support setting {attribute}")]
    Unsupported { attribute: &'static str },

    #[error("failed to set {attribute}: {source}")]
    Io {
        attribute: &'static str,
        #[source]
        source: io::Error,
    },
}

impl StampError {
    pub fn from_io(source: io::Error, attribute: &'static str) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => StampError::Vanished,
            io::ErrorKind::PermissionDenied => StampError::PermissionDenied { attribute, source },
            io::ErrorKind::Unsupported => StampError::Unsupported { attribute },
            _ => StampError::Io { attribute, source },
        }
    }
}

/// What a successful write actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamped {
    /// False when the platform has no way to set a creation time.
    pub creation_applied: bool,
}

/// Seam between the batch logic and the filesystem.
pub trait TimestampWriter {
    /// Set access, modification and (where possible) creation time of
    /// `path` to `at`.
    fn stamp(&mut self, path: &Path, at: SystemTime) -> Result<Stamped, StampError>;
}

/// Writes timestamps to the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl TimestampWriter for FsWriter {
    fn stamp(&mut self, path: &Path, at: SystemTime) -> Result<Stamped, StampError> {
        // Distinguish a file that disappeared from one we may not touch.
        fs::metadata(path).map_err(|e| StampError::from_io(e, "metadata"))?;

        let creation_applied = write_times(path, at)?;

        trace!(
            "[stamp] {:?} -> {:?} (creation: {})",
            path, at, creation_applied
        );

        Ok(Stamped { creation_applied })
    }
}

/// All three times in one call on one handle: either every time changes or
/// none does.
#[cfg(target_os = "macos")]
fn write_times(path: &Path, at: SystemTime) -> Result<bool, StampError> {
    use std::fs::{File, FileTimes};
    use std::os::macos::fs::FileTimesExt;

    const ATTRIBUTES: &str = "access/modification/creation time";

    let file = File::open(path).map_err(|e| StampError::from_io(e, ATTRIBUTES))?;
    let times = FileTimes::new()
        .set_accessed(at)
        .set_modified(at)
        .set_created(at);
    file.set_times(times)
        .map_err(|e| StampError::from_io(e, ATTRIBUTES))?;
    Ok(true)
}

#[cfg(windows)]
fn write_times(path: &Path, at: SystemTime) -> Result<bool, StampError> {
    use std::fs::{FileTimes, OpenOptions};
    use std::os::windows::fs::{FileTimesExt, OpenOptionsExt};

    // FILE_WRITE_ATTRIBUTES; plain write access would fail on read-only files.
    const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;
    const ATTRIBUTES: &str = "access/modification/creation time";

    let file = OpenOptions::new()
        .access_mode(FILE_WRITE_ATTRIBUTES)
        .open(path)
        .map_err(|e| StampError::from_io(e, ATTRIBUTES))?;
    let times = FileTimes::new()
        .set_accessed(at)
        .set_modified(at)
        .set_created(at);
    file.set_times(times)
        .map_err(|e| StampError::from_io(e, ATTRIBUTES))?;
    Ok(true)
}

/// No creation time here; returns `Ok(false)` once access and
/// modification time are set.
#[cfg(not(any(target_os = "macos", windows)))]
fn write_times(path: &Path, at: SystemTime) -> Result<bool, StampError> {
    use filetime::FileTime;

    let ft = FileTime::from_system_time(at);
    filetime::set_file_times(path, ft, ft)
        .map_err(|e| StampError::from_io(e, "access/modification time"))?;
    Ok(false)
}

#[cfg(test)]
#[path = "stamp_tests.rs"]
mod tests;
