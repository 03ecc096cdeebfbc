//! Recursive directory traversal shared by the lister entry points.
//!
//! One directory level is read completely, filtered, sorted, formatted and
//! summarized before any of its subdirectories is visited. Counters for the
//! level are folded into the caller's `GrandTotals` once the level and its
//! children are done.

use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::Entry;
use crate::error::{ListingError, Result};
use crate::output::{FormatContext, ListingOutput, format_entries, relative_directory, render};
use crate::platform::AttributeProvider;
use crate::stats::{GrandTotals, LevelStats};

use super::config::ListingConfig;
use super::filter::{FilterPipeline, PatternSet};

/// Accepted entries of one directory plus the directories to descend into.
struct LevelScan {
    accepted: Vec<Entry>,
    queue: Vec<PathBuf>,
    stats: LevelStats,
    warnings: Vec<String>,
}

/// Traversal state borrowed for the duration of one walk.
pub struct BaseTraversal<'a> {
    pub config: &'a ListingConfig,
    pub patterns: &'a PatternSet,
    pub attributes: &'a dyn AttributeProvider,
    pub cwd: &'a Path,
}

impl<'a> BaseTraversal<'a> {
    pub fn new(
        config: &'a ListingConfig,
        patterns: &'a PatternSet,
        attributes: &'a dyn AttributeProvider,
        cwd: &'a Path,
    ) -> Self {
        Self {
            config,
            patterns,
            attributes,
            cwd,
        }
    }

    /// Walk from `root`. Failure to read `root` itself is returned; failures
    /// below it are reported as warnings.
    pub fn walk_root<O: ListingOutput + ?Sized>(
        &self,
        root: &Path,
        output: &mut O,
        totals: &mut GrandTotals,
    ) -> Result<()> {
        let mut ancestors = vec![fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf())];
        self.walk_dir(root, output, totals, &mut ancestors)
    }

    fn walk_dir<O: ListingOutput + ?Sized>(
        &self,
        dir: &Path,
        output: &mut O,
        totals: &mut GrandTotals,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<()> {
        log::debug!("listing {}", dir.display());

        let LevelScan {
            mut accepted,
            queue,
            stats,
            warnings,
        } = self.scan(dir)?;
        for warning in &warnings {
            output.warning(warning)?;
        }

        self.config.sort.sort(&mut accepted);
        let ctx = FormatContext::new(self.config, self.cwd, stats.max_size);
        render(
            format_entries(&accepted, &ctx),
            self.config.head,
            self.config.tail,
            output,
        )?;

        if !stats.is_empty() {
            output.blank()?;
            let label = relative_directory(dir, self.cwd);
            if let Some(line) = stats.summary_line(&label, self.config.display.is_bare()) {
                output.line(&line)?;
            }
            if self.config.recursive {
                output.blank()?;
            }
        }

        for sub in queue {
            match self.descend(&sub, output, totals, ancestors) {
                Ok(()) => {}
                Err(ListingError::Output(e)) => return Err(ListingError::Output(e)),
                Err(e) => output.warning(&e.to_string())?,
            }
        }

        totals.absorb(&stats);
        Ok(())
    }

    fn descend<O: ListingOutput + ?Sized>(
        &self,
        dir: &Path,
        output: &mut O,
        totals: &mut GrandTotals,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let canonical = fs::canonicalize(dir).map_err(|source| ListingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if ancestors.contains(&canonical) {
            output.warning(&format!(
                "Warning \"{}\": symlink loop, not descending",
                dir.display()
            ))?;
            return Ok(());
        }

        ancestors.push(canonical);
        let result = self.walk_dir(dir, output, totals, ancestors);
        ancestors.pop();
        result
    }

    /// Read a directory once and run every entry through the filters.
    fn scan(&self, dir: &Path) -> Result<LevelScan> {
        let read_error = |source| ListingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };
        let pipeline = FilterPipeline::new(self.config, self.patterns, self.attributes);
        let mut scan = LevelScan {
            accepted: Vec::new(),
            queue: Vec::new(),
            stats: LevelStats::new(),
            warnings: Vec::new(),
        };

        for item in fs::read_dir(dir).map_err(read_error)? {
            let entry = match item.and_then(|e| Entry::from_dir_entry(&e)) {
                Ok(entry) => entry,
                Err(e) => {
                    scan.warnings
                        .push(format!("Warning \"{}\": {}", dir.display(), e));
                    continue;
                }
            };

            let verdict = pipeline.classify(&entry, &mut |w| scan.warnings.push(w));
            if verdict.descend {
                scan.queue.push(entry.path().to_path_buf());
            }
            if verdict.accept {
                scan.stats.record(&entry);
                scan.accepted.push(entry);
            } else {
                log::trace!("rejected {}", entry.path().display());
            }
        }

        Ok(scan)
    }
}
