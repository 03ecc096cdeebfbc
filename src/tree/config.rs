//! Configuration types for the directory lister

use std::time::SystemTime;

/// Default target width for the wide layout.
pub const DEFAULT_WIDE_WIDTH: usize = 80;

/// Line count used when head/tail truncation is requested without a count.
pub const DEFAULT_TRUNCATE_LINES: usize = 25;

/// Order in which accepted entries are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    Name,
    NameReversed,
    Extension,
    ExtensionReversed,
    Time,
    TimeReversed,
    Size,
    /// Historically orders by name descending rather than by size.
    SizeReversed,
    /// Directories first, then case-folded name.
    #[default]
    DirectoriesFirst,
}

impl SortMode {
    /// Pick the single sort mode from a set of requested modes.
    ///
    /// Time, size and extension (then their reversed forms) outrank plain
    /// name ordering, which outranks directories-first.
    pub fn from_requested(requested: &[SortMode]) -> SortMode {
        const PRECEDENCE: [SortMode; 9] = [
            SortMode::Time,
            SortMode::Size,
            SortMode::Extension,
            SortMode::TimeReversed,
            SortMode::SizeReversed,
            SortMode::ExtensionReversed,
            SortMode::Name,
            SortMode::NameReversed,
            SortMode::DirectoriesFirst,
        ];
        PRECEDENCE
            .into_iter()
            .find(|mode| requested.contains(mode))
            .unwrap_or_default()
    }
}

/// Rendering strategy, each carrying only the parameters it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// `YYYY-MM-DD  hh:mm AM  size name`
    #[default]
    WindowsLong,
    /// Permissions, link count, owner and group.
    UnixLong { numeric_mode: bool },
    /// Multi-column grid of names.
    Wide { width: usize },
    /// Names only.
    Bare { quote_on_space: bool },
}

impl DisplayMode {
    pub fn is_bare(&self) -> bool {
        matches!(self, DisplayMode::Bare { .. })
    }
}

/// How entry paths are shown in long and bare listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathDisplay {
    #[default]
    Name,
    /// Relative to the working directory when under it.
    Partial,
    Full,
}

/// Tri-state attribute filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttrFilter {
    #[default]
    Any,
    Only,
    Exclude,
}

impl AttrFilter {
    pub fn is_active(&self) -> bool {
        *self != AttrFilter::Any
    }
}

/// Immutable listing configuration, resolved once before traversal.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub sort: SortMode,
    pub display: DisplayMode,
    pub directories: AttrFilter,
    pub hidden: AttrFilter,
    pub read_only: AttrFilter,
    /// Accept every name without consulting the patterns.
    pub match_all: bool,
    /// Entries modified strictly before this instant are skipped.
    pub cutoff: Option<SystemTime>,
    pub ignore_case: bool,
    pub recursive: bool,
    pub path_display: PathDisplay,
    pub head: Option<usize>,
    pub tail: Option<usize>,
    /// Group file sizes with commas in the Windows-style long format.
    pub group_digits: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            sort: SortMode::default(),
            display: DisplayMode::default(),
            directories: AttrFilter::Any,
            hidden: AttrFilter::Any,
            read_only: AttrFilter::Any,
            match_all: true,
            cutoff: None,
            ignore_case: false,
            recursive: false,
            path_display: PathDisplay::Name,
            head: None,
            tail: None,
            group_digits: true,
        }
    }
}

impl ListingConfig {
    /// Configuration used to descend into directories named explicitly in
    /// absolute-path mode: everything matches, hidden entries are excluded
    /// and names are shown plainly.
    pub fn for_path_descent(&self) -> Self {
        Self {
            match_all: true,
            hidden: AttrFilter::Exclude,
            path_display: match self.path_display {
                PathDisplay::Full => PathDisplay::Full,
                _ => PathDisplay::Name,
            },
            ..self.clone()
        }
    }
}
