//! Bare listing: one name per line

use crate::entry::Entry;
use crate::tree::{AttrFilter, PathDisplay};

use super::utils::{display_name, link_suffix};
use super::{FormatContext, ListingFormat};

pub struct BareFormat {
    pub quote_on_space: bool,
}

impl ListingFormat for BareFormat {
    fn format(&self, entries: &[Entry], ctx: &FormatContext<'_>) -> Vec<String> {
        // Bare names are relative to the working directory unless full
        // paths were asked for.
        let mode = match ctx.config.path_display {
            PathDisplay::Full => PathDisplay::Full,
            _ => PathDisplay::Partial,
        };
        let bracket_dirs = ctx.config.directories != AttrFilter::Only;

        entries
            .iter()
            .map(|entry| {
                let mut name = display_name(entry, mode, ctx.cwd);
                if bracket_dirs && entry.is_effective_dir() {
                    name = format!("[{}]", name);
                }
                name.push_str(&link_suffix(entry));
                if self.quote_on_space && name.contains(' ') {
                    name = format!("\"{}\"", name);
                }
                name
            })
            .collect()
    }
}
