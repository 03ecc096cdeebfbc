//! Directory walking, filtering and sorting
//!
//! `DirectoryLister` drives a depth-first walk: each directory is read once,
//! its entries go through the `FilterPipeline`, the accepted set is ordered
//! by the configured `SortMode`, and the level is formatted and summarized
//! before any subdirectory is visited.

mod config;
mod filter;
mod sort;
mod traversal;
mod walker;

pub use config::{
    AttrFilter, DEFAULT_TRUNCATE_LINES, DEFAULT_WIDE_WIDTH, DisplayMode, ListingConfig,
    PathDisplay, SortMode,
};
pub use filter::{FilterPipeline, PatternSet, Verdict};
pub use walker::DirectoryLister;
