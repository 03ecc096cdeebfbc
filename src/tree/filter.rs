//! Entry filtering for directory listings
//!
//! Every raw entry passes through the same short-circuiting chain:
//! pseudo-entries, recursion queueing and directory filter, age cutoff,
//! wildcard match, hidden/system attributes, read-only attribute.

use glob::{MatchOptions, Pattern};

use crate::entry::Entry;
use crate::error::{ListingError, Result};
use crate::platform::AttributeProvider;

use super::config::{AttrFilter, ListingConfig};

/// Compiled shell-style wildcard patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    options: MatchOptions,
}

impl PatternSet {
    /// Compile patterns; a malformed pattern is a fatal error.
    pub fn new<S: AsRef<str>>(patterns: &[S], ignore_case: bool) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|source| ListingError::Pattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            options: MatchOptions {
                case_sensitive: !ignore_case,
                require_literal_separator: false,
                require_literal_leading_dot: false,
            },
        })
    }

    /// A set that matches nothing; pair with `match_all`.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            options: MatchOptions::new(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(name, self.options))
    }
}

/// Outcome of running one entry through the filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verdict {
    /// Queue the entry for recursion.
    pub descend: bool,
    /// Show the entry in this directory's listing.
    pub accept: bool,
}

/// The ordered predicate chain deciding inclusion.
pub struct FilterPipeline<'a> {
    config: &'a ListingConfig,
    patterns: &'a PatternSet,
    attributes: &'a dyn AttributeProvider,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(
        config: &'a ListingConfig,
        patterns: &'a PatternSet,
        attributes: &'a dyn AttributeProvider,
    ) -> Self {
        Self {
            config,
            patterns,
            attributes,
        }
    }

    /// Classify an entry. Attribute query failures are handed to `warn` and
    /// the entry is rejected.
    pub fn classify(&self, entry: &Entry, warn: &mut dyn FnMut(String)) -> Verdict {
        let name = entry.name();
        if name == "." || name == ".." {
            return Verdict::default();
        }

        let is_dir = entry.is_effective_dir();
        let mut verdict = Verdict {
            descend: is_dir && self.config.recursive,
            accept: false,
        };

        if is_dir {
            if self.config.directories == AttrFilter::Exclude {
                return verdict;
            }
        } else if self.config.directories == AttrFilter::Only {
            return verdict;
        }

        if self
            .config
            .cutoff
            .is_some_and(|cutoff| entry.modified() < cutoff)
        {
            log::trace!("{}: older than cutoff", entry.path().display());
            return verdict;
        }

        if !self.config.match_all && !self.patterns.matches(name) {
            return verdict;
        }

        if self.config.hidden.is_active() && !self.passes_hidden(entry, is_dir, warn) {
            return verdict;
        }

        if self.config.read_only.is_active() && !self.passes_read_only(entry, warn) {
            return verdict;
        }

        verdict.accept = true;
        verdict
    }

    fn passes_hidden(&self, entry: &Entry, is_dir: bool, warn: &mut dyn FnMut(String)) -> bool {
        let flagged = match self.attributes.is_hidden(entry) {
            Ok(true) => Ok(true),
            Ok(false) => self.attributes.is_system(entry),
            Err(e) => Err(e),
        };
        let flagged = match flagged {
            Ok(flagged) => flagged,
            Err(e) => {
                warn(format!("Warning \"{}\": {}", entry.path().display(), e));
                return false;
            }
        };

        // Directories stay visible when only directories are listed.
        let keep_dir = is_dir && self.config.directories == AttrFilter::Only;
        match self.config.hidden {
            AttrFilter::Only => flagged || keep_dir,
            AttrFilter::Exclude => !flagged || keep_dir,
            AttrFilter::Any => true,
        }
    }

    fn passes_read_only(&self, entry: &Entry, warn: &mut dyn FnMut(String)) -> bool {
        match self.attributes.is_read_only(entry) {
            Ok(read_only) => match self.config.read_only {
                AttrFilter::Only => read_only,
                AttrFilter::Exclude => !read_only,
                AttrFilter::Any => true,
            },
            Err(e) => {
                warn(format!("Warning \"{}\": {}", entry.path().display(), e));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;
    use std::time::{Duration, SystemTime};

    use tempfile::TempDir;

    use super::*;

    /// Attribute provider driven by name prefixes: `h` hidden, `s` system,
    /// `r` read-only, `e` query error.
    struct NameAttributes;

    impl AttributeProvider for NameAttributes {
        fn is_hidden(&self, entry: &Entry) -> io::Result<bool> {
            if entry.name().starts_with('e') {
                return Err(io::Error::other("attribute query failed"));
            }
            Ok(entry.name().starts_with('h'))
        }

        fn is_system(&self, entry: &Entry) -> io::Result<bool> {
            Ok(entry.name().starts_with('s'))
        }

        fn is_read_only(&self, entry: &Entry) -> io::Result<bool> {
            if entry.name().starts_with('e') {
                return Err(io::Error::other("attribute query failed"));
            }
            Ok(entry.name().starts_with('r'))
        }

        fn free_space(&self, _path: &Path) -> io::Result<u64> {
            Ok(0)
        }
    }

    fn entry(dir: &TempDir, name: &str) -> Entry {
        let path = dir.path().join(name.trim_end_matches('/'));
        if name.ends_with('/') {
            fs::create_dir(&path).unwrap();
        } else {
            fs::write(&path, "data").unwrap();
        }
        Entry::from_path(&path).unwrap()
    }

    fn classify(config: &ListingConfig, patterns: &PatternSet, entry: &Entry) -> (Verdict, Vec<String>) {
        let mut warnings = Vec::new();
        let verdict = FilterPipeline::new(config, patterns, &NameAttributes)
            .classify(entry, &mut |w| warnings.push(w));
        (verdict, warnings)
    }

    #[test]
    fn test_match_all_accepts_everything() {
        let dir = TempDir::new().unwrap();
        let config = ListingConfig::default();
        let patterns = PatternSet::empty();
        for name in ["a.txt", "hfile", "sub/", "rdonly"] {
            let (verdict, _) = classify(&config, &patterns, &entry(&dir, name));
            assert!(verdict.accept, "{} should be accepted", name);
        }
    }

    #[test]
    fn test_pattern_match() {
        let dir = TempDir::new().unwrap();
        let config = ListingConfig {
            match_all: false,
            ..Default::default()
        };
        let patterns = PatternSet::new(&["*.txt", "[ab]?.rs"], false).unwrap();
        assert!(classify(&config, &patterns, &entry(&dir, "notes.txt")).0.accept);
        assert!(classify(&config, &patterns, &entry(&dir, "a1.rs")).0.accept);
        assert!(!classify(&config, &patterns, &entry(&dir, "c1.rs")).0.accept);
        assert!(!classify(&config, &patterns, &entry(&dir, "NOTES.TXT")).0.accept);
    }

    #[test]
    fn test_pattern_match_ignore_case() {
        let dir = TempDir::new().unwrap();
        let config = ListingConfig {
            match_all: false,
            ignore_case: true,
            ..Default::default()
        };
        let patterns = PatternSet::new(&["*.txt"], true).unwrap();
        assert!(classify(&config, &patterns, &entry(&dir, "LOUD.TXT")).0.accept);
    }

    #[test]
    fn test_star_matches_leading_dot() {
        let patterns = PatternSet::new(&["*"], false).unwrap();
        assert!(patterns.matches(".profile"));
    }

    #[test]
    fn test_malformed_pattern_is_error() {
        let err = PatternSet::new(&["[abc"], false).unwrap_err();
        assert!(matches!(err, ListingError::Pattern { .. }));
    }

    #[test]
    fn test_directory_queued_even_when_excluded() {
        let dir = TempDir::new().unwrap();
        let config = ListingConfig {
            recursive: true,
            directories: AttrFilter::Exclude,
            match_all: false,
            ..Default::default()
        };
        let patterns = PatternSet::new(&["*.txt"], false).unwrap();
        let (verdict, _) = classify(&config, &patterns, &entry(&dir, "sub/"));
        assert!(verdict.descend);
        assert!(!verdict.accept);
    }

    #[test]
    fn test_directory_queued_when_pattern_does_not_match() {
        let dir = TempDir::new().unwrap();
        let config = ListingConfig {
            recursive: true,
            match_all: false,
            ..Default::default()
        };
        let patterns = PatternSet::new(&["*.txt"], false).unwrap();
        let (verdict, _) = classify(&config, &patterns, &entry(&dir, "sub/"));
        assert_eq!(
            verdict,
            Verdict {
                descend: true,
                accept: false
            }
        );
    }

    #[test]
    fn test_directory_only_rejects_files() {
        let dir = TempDir::new().unwrap();
        let config = ListingConfig {
            directories: AttrFilter::Only,
            ..Default::default()
        };
        let patterns = PatternSet::empty();
        assert!(!classify(&config, &patterns, &entry(&dir, "a.txt")).0.accept);
        assert!(classify(&config, &patterns, &entry(&dir, "sub/")).0.accept);
    }

    #[test]
    fn test_cutoff_excludes_older_entries() {
        let dir = TempDir::new().unwrap();
        let old = entry(&dir, "old.txt");
        File::options()
            .write(true)
            .open(old.path())
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(10 * 86_400))
            .unwrap();
        let old = Entry::from_path(old.path()).unwrap();
        let fresh = entry(&dir, "fresh.txt");

        let config = ListingConfig {
            cutoff: Some(SystemTime::now() - Duration::from_secs(86_400)),
            ..Default::default()
        };
        let patterns = PatternSet::empty();
        assert!(!classify(&config, &patterns, &old).0.accept);
        assert!(classify(&config, &patterns, &fresh).0.accept);
    }

    #[test]
    fn test_exclude_hidden_and_system() {
        let dir = TempDir::new().unwrap();
        let config = ListingConfig {
            hidden: AttrFilter::Exclude,
            ..Default::default()
        };
        let patterns = PatternSet::empty();
        assert!(!classify(&config, &patterns, &entry(&dir, "hfile")).0.accept);
        assert!(!classify(&config, &patterns, &entry(&dir, "sfile")).0.accept);
        assert!(classify(&config, &patterns, &entry(&dir, "plain")).0.accept);
    }

    #[test]
    fn test_hidden_only() {
        let dir = TempDir::new().unwrap();
        let config = ListingConfig {
            hidden: AttrFilter::Only,
            ..Default::default()
        };
        let patterns = PatternSet::empty();
        assert!(classify(&config, &patterns, &entry(&dir, "hfile")).0.accept);
        assert!(classify(&config, &patterns, &entry(&dir, "sfile")).0.accept);
        assert!(!classify(&config, &patterns, &entry(&dir, "plain")).0.accept);
        assert!(!classify(&config, &patterns, &entry(&dir, "pdir/")).0.accept);
    }

    #[test]
    fn test_hidden_filter_keeps_directories_in_directory_only_mode() {
        let dir = TempDir::new().unwrap();
        let patterns = PatternSet::empty();

        let exclude = ListingConfig {
            hidden: AttrFilter::Exclude,
            directories: AttrFilter::Only,
            ..Default::default()
        };
        assert!(classify(&exclude, &patterns, &entry(&dir, "hdir/")).0.accept);

        let only = ListingConfig {
            hidden: AttrFilter::Only,
            directories: AttrFilter::Only,
            ..Default::default()
        };
        assert!(classify(&only, &patterns, &entry(&dir, "plaindir/")).0.accept);
    }

    #[test]
    fn test_read_only_filter_has_no_directory_exception() {
        let dir = TempDir::new().unwrap();
        let patterns = PatternSet::empty();
        let config = ListingConfig {
            read_only: AttrFilter::Only,
            directories: AttrFilter::Only,
            ..Default::default()
        };
        assert!(!classify(&config, &patterns, &entry(&dir, "plaindir/")).0.accept);
        assert!(classify(&config, &patterns, &entry(&dir, "rdir/")).0.accept);

        let exclude = ListingConfig {
            read_only: AttrFilter::Exclude,
            ..Default::default()
        };
        assert!(!classify(&exclude, &patterns, &entry(&dir, "rfile")).0.accept);
        assert!(classify(&exclude, &patterns, &entry(&dir, "wfile")).0.accept);
    }

    #[test]
    fn test_attribute_error_warns_and_skips() {
        let dir = TempDir::new().unwrap();
        let patterns = PatternSet::empty();
        let config = ListingConfig {
            hidden: AttrFilter::Exclude,
            ..Default::default()
        };
        let (verdict, warnings) = classify(&config, &patterns, &entry(&dir, "erroring"));
        assert!(!verdict.accept);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("attribute query failed"));
    }

    #[test]
    fn test_attributes_not_queried_when_filters_inactive() {
        let dir = TempDir::new().unwrap();
        let (verdict, warnings) = classify(
            &ListingConfig::default(),
            &PatternSet::empty(),
            &entry(&dir, "erroring"),
        );
        assert!(verdict.accept);
        assert!(warnings.is_empty());
    }
}
