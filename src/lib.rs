//! dirx - a dir-style directory lister with wildcard filters, sort orders
//! and recursive totals

pub mod entry;
pub mod error;
pub mod output;
pub mod platform;
pub mod stats;
pub mod target;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use entry::Entry;
pub use error::{ListingError, Result};
pub use output::{BufferedOutput, ConsoleOutput, ListingOutput, OutputConfig};
pub use platform::{AttributeProvider, PlatformAttributes, VolumeInfo, filename_case_sensitive};
pub use stats::{GrandTotals, LevelStats};
pub use target::ListingTarget;
pub use tree::{
    AttrFilter, DirectoryLister, DisplayMode, ListingConfig, PathDisplay, PatternSet, SortMode,
};
