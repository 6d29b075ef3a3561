use std::{
    cmp::Ordering,
    fs::{self, read_dir},
    io::{self, Result},
    path::Path,
};

use log::{debug, warn};

use crate::{
    filter::ExtensionFilter,
    record::{FileEntry, Listing},
};

/// List the regular files directly inside `dir`, sorted by name.
///
/// Subdirectories are not descended into. Symlinks are followed, so a link
/// to a regular file is retained. With a filter, only files whose extension
/// is in it are kept.
///
/// Fails only when `dir` itself cannot be read. Entries that cannot be
/// inspected are logged and counted in [`Listing::skipped`].
pub fn list_dir(dir: &Path, filter: Option<&ExtensionFilter>) -> Result<Listing> {
    let rd = read_dir(dir)?;

    let mut entries = Vec::new();
    let mut skipped = 0;

    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[list] error reading entry in {:?}: {e}", dir);
                skipped += 1;
                continue;
            }
        };

        match inspect_entry(&entry, filter) {
            Ok(Some(file)) => entries.push(file),
            Ok(None) => {}
            Err(e) => {
                warn!("[list] cannot inspect {:?}: {e}", entry.path());
                skipped += 1;
            }
        }
    }

    sort_entries(&mut entries);

    debug!(
        "[list] {:?}: {} retained, {} skipped",
        dir,
        entries.len(),
        skipped
    );

    Ok(Listing { entries, skipped })
}

fn inspect_entry(entry: &fs::DirEntry, filter: Option<&ExtensionFilter>) -> io::Result<Option<FileEntry>> {
    let path = entry.path();

    // Cheap rejection before the metadata call.
    if let Some(filter) = filter
        && !filter.matches(&path)
    {
        return Ok(None);
    }

    if !fs::metadata(&path)?.is_file() {
        return Ok(None);
    }

    let name = entry.file_name().to_string_lossy().into_owned();
    Ok(Some(FileEntry::unsorted(path, name)))
}

/// Filename order: case-insensitive, ties broken by the exact name.
///
/// This is a total order, so `a.JPG` and `a.jpg` always come out in the
/// same relative position (`a.JPG` first).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort by [`compare_names`] and renumber `sequence_index` from 0.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.sequence_index = i;
    }
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
