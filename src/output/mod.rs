//! Listing formatters and output sinks
//!
//! Exactly one formatter runs per invocation, chosen from the configured
//! `DisplayMode`:
//!
//! - `wide` - multi-column grid of names
//! - `long` - Windows `dir`-style date, time, size and name
//! - `unix` - `ls -l`-style permissions, owner, size and name
//! - `bare` - names only
//!
//! Formatters turn a sorted batch of entries into display lines; `render`
//! applies head/tail truncation and hands the lines to a `ListingOutput`.

mod bare;
mod config;
mod long;
mod render;
mod sink;
mod unix;
mod utils;
mod wide;

use std::path::Path;

use crate::entry::Entry;
use crate::tree::{DisplayMode, ListingConfig};

pub use bare::BareFormat;
pub use config::OutputConfig;
pub use long::{WindowsLongFormat, twelve_hour};
pub use render::{OMITTED_MARKER, render, truncate};
pub use sink::{BufferedOutput, ConsoleOutput, ListingOutput};
pub use unix::{UnixLongFormat, numeric_mode, symbolic_mode};
pub use utils::{display_name, group_digits, link_suffix, relative_directory, size_text};
pub use wide::WideFormat;

/// Everything a formatter may consult besides the entries themselves.
pub struct FormatContext<'a> {
    pub config: &'a ListingConfig,
    /// Working directory used for partial-path display.
    pub cwd: &'a Path,
    /// Largest file size in the batch.
    pub max_size: u64,
}

impl<'a> FormatContext<'a> {
    pub fn new(config: &'a ListingConfig, cwd: &'a Path, max_size: u64) -> Self {
        Self {
            config,
            cwd,
            max_size,
        }
    }
}

/// A rendering strategy producing one or more display lines for a batch.
pub trait ListingFormat {
    fn format(&self, entries: &[Entry], ctx: &FormatContext<'_>) -> Vec<String>;
}

/// The formatter for a display mode.
pub fn formatter_for(mode: DisplayMode) -> Box<dyn ListingFormat> {
    match mode {
        DisplayMode::WindowsLong => Box::new(WindowsLongFormat),
        DisplayMode::UnixLong { numeric_mode } => Box::new(UnixLongFormat { numeric_mode }),
        DisplayMode::Wide { width } => Box::new(WideFormat { width }),
        DisplayMode::Bare { quote_on_space } => Box::new(BareFormat { quote_on_space }),
    }
}

/// Format a batch with the configured display mode.
pub fn format_entries(entries: &[Entry], ctx: &FormatContext<'_>) -> Vec<String> {
    formatter_for(ctx.config.display).format(entries, ctx)
}
