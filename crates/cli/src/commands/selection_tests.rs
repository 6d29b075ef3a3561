use super::*;

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use scandate_engine::AssignError;

#[derive(Debug, Parser)]
struct Harness {
    #[command(flatten)]
    selection: SelectionArgs,
}

fn args(argv: &[&str]) -> SelectionArgs {
    let mut full = vec!["scandate"];
    full.extend_from_slice(argv);
    Harness::try_parse_from(full).expect("args parse").selection
}

fn resolve(sel: &SelectionArgs, input: &str) -> Result<Selection> {
    let mut prompter = Prompter::new(input.as_bytes(), Vec::new());
    sel.resolve_with(&mut prompter)
}

fn ready(res: Result<Selection>) -> BatchRequest {
    match res.expect("resolve ok") {
        Selection::Ready(request) => request,
        other => panic!("expected a request, got {other:?}"),
    }
}

fn ten_am() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .expect("valid date")
}

#[test]
fn explicit_arguments_build_request_without_prompting() {
    let sel = args(&["/scans", "--start", "2024-01-01 10:00:00", "--increment", "5", "--utc"]);
    let req = ready(resolve(&sel, ""));

    assert_eq!(req.directory(), Path::new("/scans"));
    assert_eq!(req.start(), ten_am());
    assert_eq!(req.increment_minutes(), 5);
    assert_eq!(req.time_zone(), Zone::Utc);
}

#[test]
fn defaults_are_one_minute_local_and_image_filter() {
    let sel = args(&["/scans"]);
    let req = ready(resolve(&sel, ""));

    assert_eq!(req.increment_minutes(), 1);
    assert_eq!(req.time_zone(), Zone::Local);
    let filter = req.file_filter().expect("image filter by default");
    assert!(filter.matches(Path::new("scan.JPG")));
    assert!(filter.matches(Path::new("scan.heic")));
}

#[test]
fn ext_replaces_and_all_files_disables_filter() {
    let sel = args(&["/scans", "--ext", "webp,.gif"]);
    let filter = sel.file_filter().expect("filter");
    assert_eq!(filter.extensions(), &["gif".to_string(), "webp".to_string()]);

    let sel = args(&["/scans", "--all-files"]);
    assert!(sel.file_filter().is_none());
}

#[test]
fn ext_conflicts_with_all_files() {
    let res = Harness::try_parse_from(["scandate", "/scans", "--ext", "jpg", "--all-files"]);
    assert!(res.is_err());
}

#[test]
fn negative_increment_is_invalid_input() {
    let sel = args(&["/scans", "--increment", "-2"]);
    let err = resolve(&sel, "").expect_err("negative increment");
    assert!(matches!(
        err.downcast_ref::<AssignError>(),
        Some(AssignError::InvalidInput(_))
    ));
}

#[test]
fn malformed_start_is_invalid_input() {
    let sel = args(&["/scans", "--start", "last tuesday"]);
    let err = resolve(&sel, "").expect_err("bad start");
    assert!(matches!(
        err.downcast_ref::<AssignError>(),
        Some(AssignError::InvalidInput(_))
    ));
}

#[test]
fn missing_directory_falls_back_to_prompt() {
    let sel = args(&["--utc", "--ext", "tif"]);
    let req = ready(resolve(&sel, "/prompted\n2024-01-01 10:00:00\n15\n"));

    assert_eq!(req.directory(), Path::new("/prompted"));
    assert_eq!(req.start(), ten_am());
    assert_eq!(req.increment_minutes(), 15);
    assert_eq!(req.time_zone(), Zone::Utc);
    assert!(req.file_filter().is_some_and(|f| f.matches(Path::new("a.TIF"))));
}

#[test]
fn prompt_defaults_come_from_arguments() {
    let sel = args(&["--start", "2024-01-01 10:00:00", "--increment", "7"]);
    let req = ready(resolve(&sel, "/prompted\n\n\n"));

    assert_eq!(req.start(), ten_am());
    assert_eq!(req.increment_minutes(), 7);
}

#[test]
fn prompt_stops_are_passed_through() {
    let sel = args(&[]);
    assert!(matches!(
        resolve(&sel, "\n").expect("resolve ok"),
        Selection::Stopped(Stop::NoFolder)
    ));
    assert!(matches!(
        resolve(&sel, "/prompted\n").expect("resolve ok"),
        Selection::Stopped(Stop::InputEnded)
    ));
}
