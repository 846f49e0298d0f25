//! File and directory ignore pattern handling for bogie templates.
//! This module processes .bogieignore files to exclude entries from template
//! processing, similar to .gitignore functionality.
//!
//! Patterns match a single path segment (the entry's base name). Rules are
//! evaluated in order and the last matching rule wins, so a later `!pattern`
//! re-includes an entry excluded by an earlier rule.

use crate::error::{Error, Result};
use globset::{GlobBuilder, GlobMatcher};
use log::debug;
use std::path::Path;

/// Per-directory ignore file name
pub const IGNORE_FILE: &str = ".bogieignore";

/// Shared helper template prefixed onto every template of an application
pub const HELPERS_FILE: &str = "_helpers.tmpl";

/// Patterns every rule set starts with.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 2] = [IGNORE_FILE, HELPERS_FILE];

/// A single compiled ignore pattern.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    matcher: GlobMatcher,
    negate: bool,
    dir_only: bool,
}

impl Rule {
    /// Parses one ignore-file line. Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_end();
        if line.trim().is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (negate, rest) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line.strip_prefix('\\').unwrap_or(line)),
        };
        let (dir_only, rest) = match rest.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let pattern = rest.trim_start_matches('/');
        if pattern.is_empty() {
            return Ok(None);
        }

        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::IgnoreError(format!("invalid pattern '{line}': {e}")))?
            .compile_matcher();

        Ok(Some(Self { pattern: pattern.to_string(), matcher, negate, dir_only }))
    }

    fn matches(&self, name: &str, is_dir: bool) -> bool {
        if self.dir_only && !is_dir {
            return false;
        }
        self.matcher.is_match(name)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }

    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }
}

/// Ordered set of ignore rules scoped to a directory.
///
/// Cloning yields an independent copy, which is how a subdirectory extends
/// its parent's rules without the parent observing the change.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the rule set every run starts from, with [`DEFAULT_IGNORE_PATTERNS`].
    pub fn init() -> Self {
        let mut rules = Self::new();
        for pattern in DEFAULT_IGNORE_PATTERNS {
            // Default patterns are plain literals and always compile.
            if let Ok(Some(rule)) = Rule::parse(pattern) {
                rules.rules.push(rule);
            }
        }
        rules
    }

    /// Appends a single pattern line.
    pub fn add(&mut self, line: &str) -> Result<()> {
        if let Some(rule) = Rule::parse(line)? {
            self.rules.push(rule);
        }
        Ok(())
    }

    /// Appends every pattern in `content`, one per line.
    pub fn add_lines(&mut self, content: &str) -> Result<()> {
        content.lines().try_for_each(|line| self.add(line))
    }

    /// Reads an ignore file and appends its rules.
    ///
    /// A missing file leaves the set unchanged and is not an error.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.is_file() {
            debug!("{} does not exist", path.display());
            return Ok(());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
        self.add_lines(&contents).map_err(|e| match e {
            Error::IgnoreError(msg) => {
                Error::IgnoreError(format!("{} loading failed: {msg}", path.display()))
            }
            other => other,
        })?;
        debug!("Loaded ignore rules from {}", path.display());
        Ok(())
    }

    /// Returns whether the entry `name` should be skipped.
    pub fn ignore(&self, name: &str, is_dir: bool) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(name, is_dir))
            .is_some_and(|rule| !rule.negate)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
