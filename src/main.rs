//! CLI entry point for dirx

use std::io::IsTerminal;
use std::path::Path;
use std::process;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use dirx::output::group_digits;
use dirx::{
    AttrFilter, ConsoleOutput, DirectoryLister, DisplayMode, GrandTotals, ListingConfig,
    ListingError, ListingOutput, ListingTarget, OutputConfig, PathDisplay, PatternSet, SortMode,
    filename_case_sensitive,
};
use dirx::tree::{DEFAULT_TRUNCATE_LINES, DEFAULT_WIDE_WIDTH};

/// Environment variable holding default options.
const OPTIONS_ENV: &str = "DIRX_OPTIONS";

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stderr().is_terminal()
        }
    }
}

/// Sort keys accepted by `--sort`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortKey {
    /// Name (case-insensitive)
    Name,
    /// Name, descending
    NameRev,
    /// Extension
    Ext,
    /// Extension, descending
    ExtRev,
    /// Modification time, oldest first
    Date,
    /// Modification time, newest first
    DateRev,
    /// Size, smallest first
    Size,
    /// Legacy reversed size order (sorts by name, descending)
    SizeRev,
    /// Legacy grouping key; resolves to plain name order
    Group,
}

impl From<SortKey> for SortMode {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => SortMode::Name,
            SortKey::NameRev => SortMode::NameReversed,
            SortKey::Ext => SortMode::Extension,
            SortKey::ExtRev => SortMode::ExtensionReversed,
            SortKey::Date => SortMode::Time,
            SortKey::DateRev => SortMode::TimeReversed,
            SortKey::Size => SortMode::Size,
            SortKey::SizeRev => SortMode::SizeReversed,
            SortKey::Group => SortMode::Name,
        }
    }
}

/// Attribute filters accepted by `--attr`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AttrKey {
    /// Only directories
    Dirs,
    /// No directories
    NoDirs,
    /// Only hidden or system entries
    Hidden,
    /// No hidden or system entries
    NoHidden,
    /// Same as hidden
    System,
    /// Same as no-hidden
    NoSystem,
    /// Only read-only entries
    Readonly,
    /// No read-only entries
    NoReadonly,
}

#[derive(Parser, Debug)]
#[command(name = "dirx")]
#[command(about = "List directory contents the way the Windows dir command does")]
#[command(version)]
#[command(args_override_self = true)]
#[command(after_help = "Hidden files are shown when a wildcard pattern is given; \
use *.* instead of * to match everything including hidden entries, \
or --attr no-hidden to drop them. Default options may be set in DIRX_OPTIONS.")]
struct Args {
    /// Directories, wildcard patterns or explicit paths to list
    paths: Vec<String>,

    /// Wide multi-column listing
    #[arg(short = 'w', long = "wide")]
    wide: bool,

    /// Target line width for the wide listing (implies --wide)
    #[arg(long = "width", value_name = "COLUMNS")]
    width: Option<usize>,

    /// Bare listing: names only
    #[arg(short = 'b', long = "bare")]
    bare: bool,

    /// Quote names containing spaces (implies --bare)
    #[arg(short = 'q', long = "quote")]
    quote: bool,

    /// Show full paths
    #[arg(short = 'f', long = "full-path")]
    full_path: bool,

    /// Show paths relative to the working directory
    #[arg(short = 'p', long = "partial-path", conflicts_with = "full_path")]
    partial_path: bool,

    /// Recurse into subdirectories
    #[arg(short = 's', long = "recurse", visible_short_alias = 'r')]
    recurse: bool,

    /// Recurse into subdirectories and show full paths
    #[arg(short = 'z')]
    recurse_full: bool,

    /// Show only the first N lines of each listing (default 25; pass N as -H=N)
    #[arg(
        short = 'H',
        long = "head",
        value_name = "N",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "0"
    )]
    head: Option<usize>,

    /// Show only the last N lines of each listing (default 25; pass N as -T=N)
    #[arg(
        short = 'T',
        long = "tail",
        value_name = "N",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "0"
    )]
    tail: Option<usize>,

    /// Only show entries modified within the last N days
    #[arg(short = 'd', long = "days", value_name = "N")]
    days: Option<u64>,

    /// Only show entries modified more recently than DURATION ago
    /// Duration format: 30s, 5m, 1h, 7d, 2w, 3M, 1y
    #[arg(long = "newer", value_name = "DURATION")]
    newer: Option<String>,

    /// Sort order (may be repeated; time, size and extension win over name)
    #[arg(short = 'o', long = "sort", value_name = "KEY")]
    sort: Vec<SortKey>,

    /// Attribute filter (may be repeated)
    #[arg(short = 'a', long = "attr", value_name = "ATTR")]
    attr: Vec<AttrKey>,

    /// Unix-style long listing
    #[arg(short = 'u', long = "unix")]
    unix: bool,

    /// Unix-style long listing with numeric permissions
    #[arg(short = 'x', long = "numeric-mode")]
    numeric_mode: bool,

    /// Do not group file sizes with commas
    #[arg(short = 'c', long = "no-comma")]
    no_comma: bool,

    /// Show volume information
    #[arg(short = 'v', long = "volume")]
    volume: bool,

    /// Match patterns case-insensitively
    #[arg(short = 'i', long = "ignore-case", conflicts_with = "case_sensitive")]
    ignore_case: bool,

    /// Match patterns case-sensitively
    #[arg(long = "case-sensitive")]
    case_sensitive: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

impl Args {
    fn recursive(&self) -> bool {
        self.recurse || self.recurse_full
    }

    fn hidden_explicit(&self) -> bool {
        self.attr.iter().any(|a| {
            matches!(
                a,
                AttrKey::Hidden | AttrKey::NoHidden | AttrKey::System | AttrKey::NoSystem
            )
        })
    }
}

/// Parse a duration string like "1h", "7d", "2w" into a Duration.
fn parse_duration_string(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

/// Command line with `DIRX_OPTIONS` spliced in before the user's arguments.
fn command_line() -> Vec<String> {
    let mut argv: Vec<String> = std::env::args().collect();
    if let Ok(defaults) = std::env::var(OPTIONS_ENV) {
        let defaults: Vec<String> = defaults.split_whitespace().map(String::from).collect();
        log::debug!("default options from {}: {:?}", OPTIONS_ENV, defaults);
        argv.splice(1..1, defaults);
    }
    argv
}

/// Combine a tri-state attribute filter, rejecting contradictions.
fn set_filter(slot: &mut AttrFilter, value: AttrFilter, name: &str) -> Result<(), ListingError> {
    if slot.is_active() && *slot != value {
        return Err(ListingError::Conflict(format!(
            "cannot use both {} and no-{}",
            name, name
        )));
    }
    *slot = value;
    Ok(())
}

fn build_config(args: &Args) -> Result<ListingConfig, ListingError> {
    let mut directories = AttrFilter::Any;
    let mut hidden = AttrFilter::Any;
    let mut read_only = AttrFilter::Any;
    for attr in &args.attr {
        match attr {
            AttrKey::Dirs => set_filter(&mut directories, AttrFilter::Only, "dirs")?,
            AttrKey::NoDirs => set_filter(&mut directories, AttrFilter::Exclude, "dirs")?,
            AttrKey::Hidden | AttrKey::System => {
                set_filter(&mut hidden, AttrFilter::Only, "hidden")?
            }
            AttrKey::NoHidden | AttrKey::NoSystem => {
                set_filter(&mut hidden, AttrFilter::Exclude, "hidden")?
            }
            AttrKey::Readonly => set_filter(&mut read_only, AttrFilter::Only, "readonly")?,
            AttrKey::NoReadonly => set_filter(&mut read_only, AttrFilter::Exclude, "readonly")?,
        }
    }

    let bare = args.bare || args.quote;
    let display = if bare {
        DisplayMode::Bare {
            quote_on_space: args.quote,
        }
    } else if args.wide || args.width.is_some() {
        DisplayMode::Wide {
            width: args.width.filter(|&w| w > 0).unwrap_or(DEFAULT_WIDE_WIDTH),
        }
    } else if args.unix || args.numeric_mode {
        DisplayMode::UnixLong {
            numeric_mode: args.numeric_mode,
        }
    } else {
        DisplayMode::WindowsLong
    };

    let recursive = args.recursive();
    if bare && recursive && directories != AttrFilter::Only {
        directories = AttrFilter::Exclude;
    }

    let now = SystemTime::now();
    let before = |age: Duration| now.checked_sub(age).unwrap_or(UNIX_EPOCH);
    let days_cutoff = args
        .days
        .map(|d| before(Duration::from_secs(d.max(1).saturating_mul(24 * 60 * 60))));
    let newer_cutoff = match &args.newer {
        Some(s) => Some(before(parse_duration_string(s).map_err(|e| {
            ListingError::Conflict(format!("invalid --newer duration '{}': {}", s, e))
        })?)),
        None => None,
    };
    let cutoff = days_cutoff.max(newer_cutoff);

    let truncate_count = |n: usize| if n == 0 { DEFAULT_TRUNCATE_LINES } else { n };

    let ignore_case = if args.ignore_case {
        true
    } else if args.case_sensitive {
        false
    } else {
        !filename_case_sensitive()
    };

    let sort: Vec<SortMode> = args.sort.iter().copied().map(SortMode::from).collect();

    Ok(ListingConfig {
        sort: SortMode::from_requested(&sort),
        display,
        directories,
        hidden,
        read_only,
        match_all: true,
        cutoff,
        ignore_case,
        recursive,
        path_display: if args.full_path || args.recurse_full {
            PathDisplay::Full
        } else if args.partial_path {
            PathDisplay::Partial
        } else {
            PathDisplay::Name
        },
        head: args.head.map(truncate_count),
        tail: args.tail.map(truncate_count),
        group_digits: !args.no_comma,
    })
}

fn print_volume_header(
    lister: &DirectoryLister,
    anchor: &Path,
    output: &mut ConsoleOutput,
) -> std::io::Result<()> {
    if let Some(volume) = lister.attributes().volume_info(anchor) {
        output.line(&format!(
            "Volume in drive {} is {}, Serial {:04X}-{:04X}",
            anchor.display(),
            volume.name,
            volume.serial >> 16,
            volume.serial & 0xffff
        ))?;
    }
    Ok(())
}

fn print_footer(
    lister: &DirectoryLister,
    totals: &GrandTotals,
    show_total: bool,
    anchor: &Path,
    args: &Args,
    output: &mut ConsoleOutput,
) -> std::io::Result<()> {
    for line in totals.summary_lines(show_total) {
        output.line(&line)?;
    }

    if args.volume || !lister.config().display.is_bare() {
        match lister.attributes().free_space(anchor) {
            Ok(free) => {
                let free = group_digits(free);
                match lister.attributes().volume_info(anchor) {
                    Some(volume) => output.line(&format!(
                        "{:>32} bytes free in volume {}",
                        free, volume.name
                    ))?,
                    None => output.line(&format!("{:>32} bytes free", free))?,
                }
            }
            Err(e) => output.warning(&format!(
                "Warning: free space of {}: {}",
                anchor.display(),
                e
            ))?,
        }
    }
    Ok(())
}

fn run(args: &Args, output: &mut ConsoleOutput) -> Result<(), ListingError> {
    let mut config = build_config(args)?;
    let cwd = std::env::current_dir()?;
    let target = ListingTarget::resolve(&args.paths, &cwd, config.recursive)?;
    let anchor = target.anchor(&cwd);

    let (lister, start) = match &target {
        ListingTarget::Directory {
            start,
            patterns,
            match_all,
            implicit_all,
        } => {
            config.match_all = *match_all;
            if *implicit_all && !args.hidden_explicit() {
                config.hidden = AttrFilter::Exclude;
            }
            let patterns = if *match_all {
                PatternSet::empty()
            } else {
                PatternSet::new(patterns, config.ignore_case)?
            };
            (DirectoryLister::new(config, patterns), Some(start.clone()))
        }
        ListingTarget::Paths(_) => (DirectoryLister::new(config, PatternSet::empty()), None),
    };
    let lister = lister.with_working_dir(&cwd);

    let show_header = !lister.config().display.is_bare()
        && (args.volume || lister.config().match_all);
    if show_header {
        print_volume_header(&lister, &anchor, output)?;
    }

    let (totals, show_total) = match (&target, start) {
        (ListingTarget::Paths(paths), _) => (lister.list_paths(paths, output)?, true),
        (_, Some(start)) => (lister.list(&start, output)?, lister.config().recursive),
        (_, None) => (GrandTotals::new(), false),
    };

    log::debug!("totals: {:?}", totals);
    print_footer(&lister, &totals, show_total, &anchor, args, output)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::try_parse_from(command_line()).unwrap_or_else(|e| e.exit());
    let mut output = ConsoleOutput::new(OutputConfig {
        use_color: should_use_color(args.color),
    });

    if let Err(e) = run(&args, &mut output) {
        eprintln!("dirx: {}", e);
        process::exit(1);
    }
}
