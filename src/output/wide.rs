//! Multi-column grid of names

use crate::entry::Entry;

use super::{FormatContext, ListingFormat};

/// Narrowest column, before the separator space.
const MIN_COLUMN: usize = 13;

/// Widest column, separator included.
const MAX_COLUMN: usize = 58;

pub struct WideFormat {
    pub width: usize,
}

fn decorated(entry: &Entry) -> String {
    if entry.is_effective_dir() {
        format!("[{}]", entry.name())
    } else {
        entry.name().to_string()
    }
}

impl WideFormat {
    /// Column width (separator included) for a batch of entries.
    pub fn column_width(entries: &[Entry]) -> usize {
        let longest = entries
            .iter()
            .map(|e| decorated(e).chars().count())
            .max()
            .unwrap_or(0);
        (longest.max(MIN_COLUMN) + 1).min(MAX_COLUMN)
    }

    pub fn entries_per_line(&self, column: usize) -> usize {
        (self.width / column).max(1)
    }
}

impl ListingFormat for WideFormat {
    fn format(&self, entries: &[Entry], _ctx: &FormatContext<'_>) -> Vec<String> {
        let column = Self::column_width(entries);
        let per_line = self.entries_per_line(column);

        entries
            .chunks(per_line)
            .map(|row| {
                let mut line = String::new();
                for (i, entry) in row.iter().enumerate() {
                    let name = decorated(entry);
                    if i + 1 < row.len() {
                        let pad = column.saturating_sub(name.chars().count());
                        line.push_str(&name);
                        line.push_str(&" ".repeat(pad));
                    } else {
                        line.push_str(&name);
                    }
                }
                line
            })
            .collect()
    }
}
