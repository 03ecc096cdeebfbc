//! Resolution of command-line path arguments into a listing target.

use std::path::{Path, PathBuf};

use crate::error::{ListingError, Result};

const WILDCARDS: &[char] = &['*', '?', '['];

/// What a run lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingTarget {
    /// Walk `start`, matching names against `patterns` unless `match_all`.
    Directory {
        start: PathBuf,
        patterns: Vec<String>,
        match_all: bool,
        /// True when no argument was given at all (or only a directory), so
        /// hidden entries should be excluded unless asked for.
        implicit_all: bool,
    },
    /// Explicit paths with no wildcard anywhere.
    Paths(Vec<PathBuf>),
}

fn has_wildcard(arg: &str) -> bool {
    arg.contains(WILDCARDS)
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Split an argument into its directory part and final component.
fn split_arg(arg: &str) -> (Option<&Path>, &str) {
    let path = Path::new(arg);
    match (path.parent(), path.file_name().and_then(|n| n.to_str())) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => (Some(parent), name),
        (_, Some(name)) => (None, name),
        _ => (None, arg),
    }
}

impl ListingTarget {
    /// Resolve positional arguments relative to `cwd`.
    pub fn resolve(args: &[String], cwd: &Path, recursive: bool) -> Result<Self> {
        if args.is_empty() {
            return Ok(ListingTarget::Directory {
                start: cwd.to_path_buf(),
                patterns: Vec::new(),
                match_all: true,
                implicit_all: true,
            });
        }

        if let [only] = args {
            let path = absolute(cwd, Path::new(only));
            if !has_wildcard(only) && path.is_dir() {
                return Ok(ListingTarget::Directory {
                    start: path,
                    patterns: Vec::new(),
                    match_all: true,
                    implicit_all: true,
                });
            }
        }

        if !recursive && !args.iter().any(|a| has_wildcard(a)) {
            return Ok(ListingTarget::Paths(
                args.iter().map(|a| absolute(cwd, Path::new(a))).collect(),
            ));
        }

        let (dir, _) = split_arg(&args[0]);
        let start = dir.map(|d| absolute(cwd, d)).unwrap_or_else(|| cwd.to_path_buf());
        let patterns: Vec<String> = args
            .iter()
            .map(|a| split_arg(a).1.to_string())
            .collect();

        let match_all = patterns.iter().any(|p| p == "*" || p == "*.*");
        if match_all && patterns.len() > 1 {
            return Err(ListingError::Conflict(format!(
                "cannot combine multiple patterns {:?} with * or *.*",
                patterns
            )));
        }

        Ok(ListingTarget::Directory {
            start,
            patterns: if match_all { Vec::new() } else { patterns },
            match_all,
            implicit_all: false,
        })
    }

    /// Directory used for volume and free-space queries.
    pub fn anchor(&self, cwd: &Path) -> PathBuf {
        match self {
            ListingTarget::Directory { start, .. } => start.clone(),
            ListingTarget::Paths(_) => cwd.to_path_buf(),
        }
    }
}
