use super::*;

use chrono::NaiveDate;

fn midnight() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

fn defaults() -> Defaults {
    Defaults {
        directory_hint: PathBuf::from("/home/user"),
        start: midnight(),
        increment_minutes: 1,
    }
}

fn run(input: &str) -> (io::Result<Prompted>, String) {
    let mut out = Vec::new();
    let res = Prompter::new(input.as_bytes(), &mut out).collect(&defaults());
    (res, String::from_utf8(out).expect("utf8 output"))
}

fn answered(res: io::Result<Prompted>) -> Answers {
    match res.expect("io ok") {
        Prompted::Answered(answers) => answers,
        other => panic!("expected answers, got {other:?}"),
    }
}

#[test]
fn collect_uses_defaults_on_empty_answers() {
    let (res, _) = run("/scans\n\n\n");
    let answers = answered(res);

    assert_eq!(
        answers,
        Answers {
            directory: PathBuf::from("/scans"),
            start: midnight(),
            increment_minutes: 1,
        }
    );
}

#[test]
fn collect_parses_explicit_answers() {
    let (res, out) = run("  /scans/1998  \n1998-07-14 09:30:00\n5\n");
    let answers = answered(res);

    assert_eq!(answers.directory, PathBuf::from("/scans/1998"));
    assert_eq!(
        answers.start,
        NaiveDate::from_ymd_opt(1998, 7, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    );
    assert_eq!(answers.increment_minutes, 5);
    assert!(out.contains("Folder with images to update (e.g. /home/user): "));
    assert!(out.contains("[2024-01-01 00:00:00]"));
}

#[test]
fn collect_reasks_on_invalid_start_and_increment() {
    let (res, out) = run("/scans\nnot a date\n2024-05-01 08:00\n-3\nabc\n0\n");
    let answers = answered(res);

    assert_eq!(
        answers.start,
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    );
    assert_eq!(answers.increment_minutes, 0);
    assert!(out.contains("cannot parse start date-time"));
    assert_eq!(
        out.matches("Enter a whole number of minutes").count(),
        2
    );
}

#[test]
fn collect_accepts_now() {
    let (res, _) = run("/scans\nNOW\n\n");
    let answers = answered(res);
    assert!(answers.start > midnight());
}

#[test]
fn blank_start_takes_the_default_not_the_current_time() {
    let (res, _) = run("/scans\n\n3\n");
    let answers = answered(res);
    assert_eq!(answers.start, midnight());
    assert_eq!(answers.increment_minutes, 3);
}

#[test]
fn directory_has_no_default() {
    let (res, out) = run("\n");
    assert_eq!(res.expect("io ok"), Prompted::Stopped(Stop::NoFolder));
    // the home directory is only an example
    assert!(out.contains("(e.g. /home/user)"));
    assert!(!out.contains("[/home/user]"));
}

#[test]
fn end_of_input_is_not_a_missing_folder() {
    for input in ["", "/scans\n", "/scans\n2024-01-01 00:00:00\n"] {
        let (res, _) = run(input);
        assert_eq!(
            res.expect("io ok"),
            Prompted::Stopped(Stop::InputEnded),
            "input {input:?}"
        );
    }
}

#[test]
fn stop_messages_differ() {
    assert_eq!(Stop::NoFolder.to_string(), "No folder selected. Exiting.");
    assert_eq!(
        Stop::InputEnded.to_string(),
        "Input ended before all answers were given. Exiting."
    );
}
