//! Windows `dir`-style long listing

use chrono::{DateTime, Datelike, Local, Timelike};

use crate::entry::Entry;
use crate::stats::SIZE_FIELD_WIDTH;

use super::utils::{display_name, link_suffix, size_text};
use super::{FormatContext, ListingFormat};

const DIR_MARKER: &str = "<DIR>         ";
const JUNCTION_MARKER: &str = "<JUNCTION>    ";

pub struct WindowsLongFormat;

impl WindowsLongFormat {
    /// Width of the size column for a batch whose largest file is `max_size`.
    pub fn size_width(max_size: u64, grouped: bool) -> usize {
        SIZE_FIELD_WIDTH.max(size_text(max_size, grouped).len())
    }
}

/// 12-hour clock as the legacy listing prints it: only hours past noon are
/// shifted, so midnight stays `00 AM` and noon stays `12 AM`.
pub fn twelve_hour(hour: u32) -> (u32, &'static str) {
    if hour > 12 { (hour - 12, "PM") } else { (hour, "AM") }
}

impl ListingFormat for WindowsLongFormat {
    fn format(&self, entries: &[Entry], ctx: &FormatContext<'_>) -> Vec<String> {
        let grouped = ctx.config.group_digits;
        let width = Self::size_width(ctx.max_size, grouped);

        entries
            .iter()
            .map(|entry| {
                let size = if entry.is_effective_dir() {
                    if entry.is_symlink() {
                        JUNCTION_MARKER.to_string()
                    } else {
                        DIR_MARKER.to_string()
                    }
                } else {
                    size_text(entry.size(), grouped)
                };

                let time: DateTime<Local> = entry.modified().into();
                let (hour, am_pm) = twelve_hour(time.hour());
                format!(
                    "{:04}-{:02}-{:02}  {:02}:{:02} {}  {:>width$} {}{}",
                    time.year(),
                    time.month(),
                    time.day(),
                    hour,
                    time.minute(),
                    am_pm,
                    size,
                    display_name(entry, ctx.config.path_display, ctx.cwd),
                    link_suffix(entry),
                    width = width
                )
            })
            .collect()
    }
}
