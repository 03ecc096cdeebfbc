//! DirectoryLister - the public entry point for listing runs

use std::path::{Path, PathBuf};

use crate::entry::Entry;
use crate::error::Result;
use crate::output::{FormatContext, ListingOutput, format_entries, render};
use crate::platform::{AttributeProvider, PlatformAttributes};
use crate::stats::GrandTotals;

use super::config::{DisplayMode, ListingConfig, PathDisplay};
use super::filter::PatternSet;
use super::traversal::BaseTraversal;

/// Lists directories according to an immutable `ListingConfig`.
pub struct DirectoryLister {
    config: ListingConfig,
    patterns: PatternSet,
    attributes: Box<dyn AttributeProvider>,
    cwd: PathBuf,
}

impl DirectoryLister {
    pub fn new(config: ListingConfig, patterns: PatternSet) -> Self {
        Self {
            config,
            patterns,
            attributes: Box::new(PlatformAttributes),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Replace the operating-system attribute queries.
    pub fn with_attributes(mut self, attributes: Box<dyn AttributeProvider>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Directory that partial paths and summary labels are relative to.
    pub fn with_working_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn attributes(&self) -> &dyn AttributeProvider {
        self.attributes.as_ref()
    }

    /// List `start` (recursively when configured) and return the totals.
    ///
    /// An unreadable `start` is an error; unreadable subdirectories are
    /// reported through `output.warning` and skipped.
    pub fn list<O: ListingOutput + ?Sized>(&self, start: &Path, output: &mut O) -> Result<GrandTotals> {
        let mut totals = GrandTotals::new();
        BaseTraversal::new(&self.config, &self.patterns, self.attributes.as_ref(), &self.cwd)
            .walk_root(start, output, &mut totals)?;
        Ok(totals)
    }

    /// List explicitly named paths, then descend into the ones that are
    /// directories.
    ///
    /// Paths are shown with at least their working-directory-relative part so
    /// that identically named entries from different directories stay
    /// distinguishable. Missing paths are warnings.
    pub fn list_paths<O: ListingOutput + ?Sized>(
        &self,
        paths: &[PathBuf],
        output: &mut O,
    ) -> Result<GrandTotals> {
        let mut totals = GrandTotals::new();
        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            match Entry::from_path(path) {
                Ok(entry) => {
                    totals.record_path(&entry);
                    entries.push(entry);
                }
                Err(e) => output.warning(&format!("{}: {}", path.display(), e))?,
            }
        }

        let flat = ListingConfig {
            path_display: match self.config.path_display {
                PathDisplay::Full => PathDisplay::Full,
                _ => PathDisplay::Partial,
            },
            display: match self.config.display {
                mode @ (DisplayMode::UnixLong { .. } | DisplayMode::Bare { .. }) => mode,
                _ => DisplayMode::WindowsLong,
            },
            ..self.config.clone()
        };
        let ctx = FormatContext::new(&flat, &self.cwd, 0);
        render(format_entries(&entries, &ctx), flat.head, flat.tail, output)?;
        output.blank()?;

        let descent = self.config.for_path_descent();
        let everything = PatternSet::empty();
        let traversal =
            BaseTraversal::new(&descent, &everything, self.attributes.as_ref(), &self.cwd);
        for entry in entries.iter().filter(|e| e.is_effective_dir()) {
            if let Err(e) = traversal.walk_root(entry.path(), output, &mut totals) {
                output.warning(&e.to_string())?;
            }
            output.blank()?;
        }

        Ok(totals)
    }
}
