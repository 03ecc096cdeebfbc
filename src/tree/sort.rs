//! Entry ordering

use std::cmp::Ordering;

use crate::entry::Entry;

use super::config::SortMode;

impl SortMode {
    /// Compare two entries under this mode.
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            SortMode::Name => folded_name(a).cmp(&folded_name(b)),
            SortMode::NameReversed => folded_name(b).cmp(&folded_name(a)),
            SortMode::Extension => folded_ext(a).cmp(&folded_ext(b)),
            SortMode::ExtensionReversed => folded_ext(b).cmp(&folded_ext(a)),
            SortMode::Time => a.modified().cmp(&b.modified()),
            SortMode::TimeReversed => b.modified().cmp(&a.modified()),
            SortMode::Size => a.size().cmp(&b.size()),
            // Raw name, descending. Kept for compatibility with the legacy
            // ordering; this does not look at sizes.
            SortMode::SizeReversed => b.name().cmp(a.name()),
            SortMode::DirectoriesFirst => b
                .is_effective_dir()
                .cmp(&a.is_effective_dir())
                .then_with(|| folded_name(a).cmp(&folded_name(b))),
        }
    }

    /// Sort entries in place.
    pub fn sort(&self, entries: &mut [Entry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

fn folded_name(entry: &Entry) -> String {
    entry.name().to_lowercase()
}

fn folded_ext(entry: &Entry) -> String {
    entry.extension().to_lowercase()
}
