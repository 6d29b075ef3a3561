mod filter;
mod listing;
mod record;
mod stamp;

pub use filter::ExtensionFilter;
pub use listing::{compare_names, list_dir, sort_entries};
pub use record::{FileEntry, Listing};
pub use stamp::{FsWriter, StampError, Stamped, TimestampWriter};
