use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};

use crate::{error::AssignError, request::Zone};

/// `start + index * increment_minutes` with calendar rollover.
///
/// Returns `None` when the result leaves chrono's representable range.
pub fn timestamp_at(start: NaiveDateTime, increment_minutes: u32, index: usize) -> Option<NaiveDateTime> {
    let index = i64::try_from(index).ok()?;
    let minutes = index.checked_mul(i64::from(increment_minutes))?;
    let delta = TimeDelta::try_minutes(minutes)?;
    start.checked_add_signed(delta)
}

/// Fail early when the last file of a batch of `count` would overflow.
///
/// Timestamps are non-decreasing in the index, so checking the last one
/// covers the whole batch.
pub fn check_range(start: NaiveDateTime, increment_minutes: u32, count: usize) -> Result<(), AssignError> {
    let Some(last) = count.checked_sub(1) else {
        return Ok(());
    };

    match timestamp_at(start, increment_minutes, last) {
        Some(_) => Ok(()),
        None => Err(AssignError::invalid(format!(
            "{count} files at {increment_minutes} minute steps from {start} overflow the calendar"
        ))),
    }
}

/// The UTC offset a whole batch is anchored with, read at `start`.
///
/// One offset per batch keeps the instants strictly ordered like the naive
/// schedule, even when the batch runs across a DST change. An ambiguous
/// local start takes the earlier instant; a start inside a DST gap takes
/// the offset in effect before the gap.
pub fn batch_offset(start: NaiveDateTime, zone: Zone) -> FixedOffset {
    match zone {
        Zone::Utc => Utc.fix(),
        Zone::Local => Local
            .from_local_datetime(&start)
            .earliest()
            .or_else(|| {
                start
                    .checked_sub_signed(TimeDelta::days(1))
                    .and_then(|before| Local.from_local_datetime(&before).earliest())
            })
            .map(|dt| dt.offset().fix())
            .unwrap_or_else(|| Local.offset_from_utc_datetime(&start).fix()),
    }
}

/// Anchor a naive date-time with a fixed offset. Saturates at the ends of
/// the calendar.
pub fn to_instant(naive: NaiveDateTime, offset: FixedOffset) -> DateTime<Utc> {
    let shift = TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    let utc = naive.checked_sub_signed(shift).unwrap_or(if shift > TimeDelta::zero() {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    });
    Utc.from_utc_datetime(&utc)
}

pub fn to_system_time(naive: NaiveDateTime, offset: FixedOffset) -> SystemTime {
    SystemTime::from(to_instant(naive, offset))
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
