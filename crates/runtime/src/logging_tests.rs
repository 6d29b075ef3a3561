use super::*;
use chrono::TimeZone;
use log::{Level, Metadata, Record};
use serial_test::serial;

#[test]
#[serial]
fn get_level_from_env_parses_cases() {
    let cases: &[(Option<&str>, Level)] = &[
        (None, Level::Warn),
        (Some("debug"), Level::Debug),
        (Some("DEBUG"), Level::Debug),
        (Some("info"), Level::Info),
        (Some("warn"), Level::Warn),
        (Some("error"), Level::Error),
        (Some("trace"), Level::Trace),
        (Some("garbage"), Level::Warn),
        (Some("off"), Level::Warn),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, v) },
            None => unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) },
        }

        let lvl = get_level_from_env();
        assert_eq!(
            lvl, *expected,
            "env {:?} should yield level {:?}, got {:?}",
            value, expected, lvl
        );
    }

    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };
}

#[test]
fn enabled_respects_level_threshold() {
    let levels = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    for logger_level in levels {
        let logger = Logger::new(logger_level);

        for record_level in levels {
            let meta = Metadata::builder()
                .level(record_level)
                .target("scandate_engine")
                .build();

            assert_eq!(
                logger.enabled(&meta),
                record_level <= logger_level,
                "logger level {:?}, record level {:?}",
                logger_level,
                record_level
            );
        }
    }
}

#[test]
fn format_line_has_timestamp_level_target_and_message() {
    let now = Local
        .with_ymd_and_hms(2024, 1, 1, 10, 0, 0)
        .single()
        .expect("unambiguous local time");
    let args = format_args!("stamped {} files", 3);
    let record = Record::builder()
        .level(Level::Info)
        .target("scandate_engine::assigner")
        .args(args)
        .build();

    let line = format_line(now, &record);
    assert_eq!(
        line,
        "2024-01-01 10:00:00.000 INFO [scandate_engine::assigner] stamped 3 files"
    );
}

#[test]
fn init_twice_is_ok() {
    init_with_level(Level::Error).expect("first init");
    init_with_level(Level::Trace).expect("second init is a no-op");
}
