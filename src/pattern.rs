//! Glob pattern matching for the skip lists.
//!
//! Two skip lists drive a revision run: `skip_rename` (files whose name never
//! changes) and `skip_find_deps` (files never scanned for references). Both are
//! sets of glob patterns compiled once into a [`PatternSet`] and queried with
//! relative, forward-slash separated paths.
//!
//! # Pattern Syntax
//!
//! - `*` matches any sequence of characters within a single path component
//! - `**` matches any sequence of path components
//! - `?` matches any single character
//! - `[abc]` / `[a-z]` match one character from the set or range
//!
//! Wildcards never match a leading `.`, so `*.png` does not match `.png`.
//!
//! # Base-name Matching
//!
//! A pattern without a `/` is matched against the file's base name, a pattern
//! with a `/` against the whole relative path:
//!
//! | Pattern        | `logo.png` | `img/logo.png` | `img/2x/logo.png` |
//! |----------------|------------|----------------|-------------------|
//! | `*.png`        | yes        | yes            | yes               |
//! | `img/*.png`    | no         | yes            | no                |
//! | `img/**/*.png` | no         | yes            | yes               |

use glob::{MatchOptions, Pattern};
use tracing::trace;

use crate::core::RevError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A single compiled glob pattern.
///
/// # Examples
///
/// ```rust,no_run
/// use assetrev::pattern::PatternMatcher;
///
/// # fn example() -> Result<(), assetrev::core::RevError> {
/// let matcher = PatternMatcher::new("*.png")?;
/// assert!(matcher.matches("img/logo.png"));
/// assert!(!matcher.matches("img/logo.svg"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    original_pattern: String,
    base_name_only: bool,
}

impl PatternMatcher {
    /// Compiles a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RevError::InvalidPattern`] if the pattern is not valid glob
    /// syntax (for example an unclosed `[`).
    pub fn new(pattern_str: &str) -> Result<Self, RevError> {
        let pattern = Pattern::new(pattern_str).map_err(|e| RevError::InvalidPattern {
            pattern: pattern_str.to_string(),
            reason: e.msg.to_string(),
        })?;

        Ok(Self {
            pattern,
            original_pattern: pattern_str.to_string(),
            base_name_only: !pattern_str.contains('/'),
        })
    }

    /// Checks a relative path against the pattern.
    pub fn matches(&self, path: &str) -> bool {
        let subject = if self.base_name_only {
            base_name(path)
        } else {
            path
        };
        self.pattern.matches_with(subject, MATCH_OPTIONS)
    }

    /// Returns the pattern string as written.
    pub fn pattern(&self) -> &str {
        &self.original_pattern
    }
}

/// A set of patterns; a path matches the set if it matches any member.
///
/// An empty set matches nothing.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    matchers: Vec<PatternMatcher>,
}

impl PatternSet {
    /// Compiles every pattern in `patterns`.
    ///
    /// # Errors
    ///
    /// Fails on the first pattern that does not compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, RevError> {
        let matchers = patterns
            .iter()
            .map(|p| PatternMatcher::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            matchers,
        })
    }

    /// Returns true if `path` matches at least one pattern in the set.
    pub fn matches(&self, path: &str) -> bool {
        let hit = self.matchers.iter().find(|m| m.matches(path));
        if let Some(matcher) = hit {
            trace!("'{}' matched pattern '{}'", path, matcher.pattern());
        }
        hit.is_some()
    }

    /// The patterns in the set, as written.
    pub fn patterns(&self) -> Vec<&str> {
        self.matchers.iter().map(PatternMatcher::pattern).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// Final component of a forward-slash separated relative path.
pub fn base_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}
