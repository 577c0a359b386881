//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse declarative patterns (`/academy`, `/academy/*`, `/academy/:path*`)
//! - Decide whether a request path falls inside the redirector's scope
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Subtree patterns respect segment boundaries (`/academydemo` is outside `/academy/*`)
//! - No regex to guarantee O(n) matching

use thiserror::Error;

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Errors raised while parsing a pattern.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    NotAbsolute(String),

    #[error("pattern '{0}' has a wildcard outside its last segment")]
    MisplacedWildcard(String),
}

/// A single declarative path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches exactly this path.
    Exact(String),
    /// Matches every path strictly below this base (`<base>/...`).
    Subtree(String),
}

impl PathPattern {
    /// Parse a pattern string.
    ///
    /// `/foo/*` and `/foo/:name*` both denote the subtree under `/foo`;
    /// anything else is an exact path.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::NotAbsolute(raw.to_string()));
        }

        let (base, last) = match raw.rfind('/') {
            Some(idx) => (&raw[..idx], &raw[idx + 1..]),
            None => return Err(PatternError::NotAbsolute(raw.to_string())),
        };

        let is_wildcard = last == "*" || (last.starts_with(':') && last.ends_with('*'));
        if is_wildcard {
            if base.contains('*') {
                return Err(PatternError::MisplacedWildcard(raw.to_string()));
            }
            return Ok(Self::Subtree(base.to_string()));
        }

        if raw.contains('*') {
            return Err(PatternError::MisplacedWildcard(raw.to_string()));
        }
        Ok(Self::Exact(raw.to_string()))
    }
}

impl Matcher for PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(expected) => path == expected,
            Self::Subtree(base) => path
                .strip_prefix(base.as_str())
                .is_some_and(|rest| rest.starts_with('/')),
        }
    }
}

/// Combines multiple patterns with OR semantics.
#[derive(Debug, Clone, Default)]
pub struct MatcherSet {
    patterns: Vec<PathPattern>,
}

impl MatcherSet {
    pub fn new(patterns: Vec<PathPattern>) -> Self {
        Self { patterns }
    }

    /// Parse every pattern, failing on the first malformed one.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, PatternError> {
        raw.iter()
            .map(|p| PathPattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Patterns covering a prefix and everything below it.
    pub fn for_prefixes<'a>(prefixes: impl IntoIterator<Item = &'a str>) -> Self {
        let patterns = prefixes
            .into_iter()
            .flat_map(|p| {
                [
                    PathPattern::Exact(p.to_string()),
                    PathPattern::Subtree(p.to_string()),
                ]
            })
            .collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }

    /// True when both the bare prefix and its subtree are in scope.
    pub fn covers_prefix(&self, prefix: &str) -> bool {
        self.matches(prefix) && self.matches(&format!("{}/", prefix))
    }
}

impl Matcher for MatcherSet {
    fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}
