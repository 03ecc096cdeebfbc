//! Per-directory counters and grand totals
//!
//! `LevelStats` accumulates counts for one directory while its entries are
//! filtered; once the level has been printed it is folded into
//! `GrandTotals`, which the caller reads after the whole traversal.

use crate::entry::Entry;
use crate::output::group_digits;

/// Minimum width of the size column in the Windows-style long format.
pub const SIZE_FIELD_WIDTH: usize = 14;

/// Counters for the accepted entries of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelStats {
    pub files: usize,
    pub directories: usize,
    pub total_size: u64,
    pub max_size: u64,
    pub max_name_len: usize,
}

impl LevelStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted entry.
    pub fn record(&mut self, entry: &Entry) {
        if entry.is_effective_dir() {
            self.directories += 1;
        } else {
            self.files += 1;
            self.total_size += entry.size();
            self.max_size = self.max_size.max(entry.size());
        }
        self.max_name_len = self.max_name_len.max(entry.name().chars().count());
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0 && self.directories == 0
    }

    /// The summary line printed under a directory listing, if any.
    ///
    /// `bare` suppresses the single-file phrasing.
    pub fn summary_line(&self, directory: &str, bare: bool) -> Option<String> {
        if self.files == 1 && !bare {
            Some(format!(
                "{:width$} Only one file in {}",
                "",
                directory,
                width = SIZE_FIELD_WIDTH + 5
            ))
        } else if self.files > 1 {
            let counts = format!(
                "{} Files {} ({} bytes)",
                self.files,
                group_digits(self.total_size),
                self.total_size
            );
            Some(format!(
                "{:>width$} {}",
                counts,
                directory,
                width = SIZE_FIELD_WIDTH + 22
            ))
        } else if self.directories == 1 {
            Some(format!(
                "{:width$} Only one directory in {}",
                "",
                directory,
                width = SIZE_FIELD_WIDTH
            ))
        } else if self.directories > 1 {
            Some(format!(
                "{:>width$} directories in {}",
                self.directories,
                directory,
                width = SIZE_FIELD_WIDTH
            ))
        } else {
            None
        }
    }
}

/// Totals across an entire run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrandTotals {
    pub files: usize,
    pub directories: usize,
    pub total_size: u64,
}

impl GrandTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished directory level into the totals.
    pub fn absorb(&mut self, level: &LevelStats) {
        self.files += level.files;
        self.directories += level.directories;
        self.total_size += level.total_size;
    }

    /// Count a path listed explicitly in absolute-path mode.
    pub fn record_path(&mut self, entry: &Entry) {
        self.files += 1;
        self.total_size += entry.size();
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0 && self.directories == 0
    }

    /// Closing lines for the run: "No file found", or the file total when
    /// more than one file was seen and `show_total` is set.
    pub fn summary_lines(&self, show_total: bool) -> Vec<String> {
        if self.is_empty() {
            vec!["No file found".to_string()]
        } else if self.files > 1 && show_total {
            vec![format!(
                "{:5} File(s)  {:>width$} bytes total",
                self.files,
                group_digits(self.total_size),
                width = SIZE_FIELD_WIDTH
            )]
        } else {
            Vec::new()
        }
    }
}
