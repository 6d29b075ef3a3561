use std::path::Path;

use scandate_runtime::split_extension_list;

/// Case-insensitive set of file extensions.
///
/// Entries are stored lowercase without the leading dot. A file with no
/// extension never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    exts: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut exts: Vec<String> = exts
            .into_iter()
            .map(|s| s.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        exts.sort();
        exts.dedup();
        Self { exts }
    }

    /// Parse a comma separated list such as `"jpg,.PNG"`.
    pub fn parse(raw: &str) -> Self {
        Self::new(split_extension_list(raw))
    }

    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }

    pub fn extensions(&self) -> &[String] {
        &self.exts
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|os| os.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.exts.binary_search(&ext).is_ok()
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
