use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "scandate";
pub const PROGRAM_LOG_LEVEL: &str = "SCANDATE_LOG_LEVEL";
/// Comma separated extension list that replaces [`IMAGE_EXTENSIONS`].
pub const PROGRAM_EXTENSIONS: &str = "SCANDATE_EXTENSIONS";

/// Minutes between two consecutive files when nothing else is given.
pub const DEFAULT_INCREMENT_MINUTES: u32 = 1;

/// Extensions a scanner or camera typically produces.
/// All entries are lowercase and without the leading dot.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "tiff", "tif", "heic", "nef", "cr2", "arw",
];

/// Accepted textual forms for the start date-time, tried in order.
pub const START_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Canonical display form, also the first entry of [`START_FORMATS`].
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default extension filter.
///
/// `SCANDATE_EXTENSIONS` wins when it is set and holds at least one
/// non-empty item; otherwise the built-in image set is used.
pub fn default_extensions() -> Vec<String> {
    if let Ok(raw) = std::env::var(PROGRAM_EXTENSIONS) {
        let parsed = split_extension_list(&raw);
        if !parsed.is_empty() {
            return parsed;
        }
    }

    IMAGE_EXTENSIONS.iter().map(|s| (*s).to_owned()).collect()
}

/// Split `"jpg, .PNG,,tif"` into `["jpg", "png", "tif"]`.
pub fn split_extension_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Directory offered first when the user is asked to pick one.
pub fn default_pick_dir() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
