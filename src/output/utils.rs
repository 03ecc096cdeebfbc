//! Shared helpers for listing formatters

use std::path::{MAIN_SEPARATOR, Path};

use crate::entry::Entry;
use crate::tree::PathDisplay;

/// Format a number with comma thousands separators.
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Size text as shown in the Windows-style long format.
pub fn size_text(size: u64, grouped: bool) -> String {
    if grouped {
        group_digits(size)
    } else {
        size.to_string()
    }
}

/// `path` relative to `base`, or `None` when it does not lie under it.
fn strip_base<'p>(path: &'p Path, base: &Path) -> Option<&'p Path> {
    path.strip_prefix(base)
        .ok()
        .filter(|rest| !rest.as_os_str().is_empty())
}

/// The name shown for an entry under the given path display mode.
pub fn display_name(entry: &Entry, mode: PathDisplay, cwd: &Path) -> String {
    match mode {
        PathDisplay::Name => entry.name().to_string(),
        PathDisplay::Partial => strip_base(entry.path(), cwd)
            .unwrap_or(entry.path())
            .display()
            .to_string(),
        PathDisplay::Full => entry.path().display().to_string(),
    }
}

/// `" [target]"` for symlinks, empty otherwise.
pub fn link_suffix(entry: &Entry) -> String {
    entry
        .link_target()
        .map(|target| format!(" [{}]", target.display()))
        .unwrap_or_default()
}

/// Directory label used in per-level summaries.
///
/// Paths under the parent of the working directory are shown relative to
/// it; a single remaining component gets a `./` prefix.
pub fn relative_directory(directory: &Path, cwd: &Path) -> String {
    let Some(relative) = cwd.parent().and_then(|parent| strip_base(directory, parent)) else {
        return directory.display().to_string();
    };
    if relative.components().count() == 1 {
        format!(".{}{}", MAIN_SEPARATOR, relative.display())
    } else {
        relative.display().to_string()
    }
}
