//! Redirect rule evaluation.
//!
//! # Responsibilities
//! - Store compiled redirect rules
//! - Classify a request path as redirect or continue
//! - Build the absolute `Location` for redirects
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Prefixes match on segment boundaries only
//! - Longest prefix wins when rules overlap
//! - Explicit `Continue` rather than a silent default

use axum::http::StatusCode;
use thiserror::Error;
use url::Url;

use crate::config::schema::{RedirectConfig, RedirectRuleConfig};
use crate::routing::matcher::{Matcher, MatcherSet, PatternError};

/// Errors raised while compiling a redirect rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule '{name}': prefix '{prefix}' must start with '/' and name at least one segment")]
    InvalidPrefix { name: String, prefix: String },

    #[error("rule '{name}': prefix '{prefix}' must not end with '/'")]
    TrailingSlash { name: String, prefix: String },

    #[error("rule '{name}': target '{target}' is not an absolute http(s) URL")]
    InvalidTarget { name: String, target: String },

    #[error("rule '{name}': target '{target}' must not carry a query or fragment")]
    TargetHasQuery { name: String, target: String },

    #[error("rule '{name}': status {status} is not a redirect status")]
    InvalidStatus { name: String, status: u16 },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("matcher does not cover prefix '{0}' and its sub-paths")]
    Uncovered(String),
}

/// A compiled prefix -> external URL rule.
#[derive(Debug, Clone)]
pub struct RedirectRule {
    name: String,
    prefix: String,
    /// Target base without trailing slash.
    target: String,
    status: StatusCode,
    preserve_query: bool,
}

impl RedirectRule {
    /// Compile a rule, normalizing the target base URL.
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        target: &str,
        status: u16,
        preserve_query: bool,
    ) -> Result<Self, RuleError> {
        let name = name.into();
        let prefix = prefix.into();

        if !prefix.starts_with('/') || prefix.len() < 2 {
            return Err(RuleError::InvalidPrefix { name, prefix });
        }
        if prefix.ends_with('/') {
            return Err(RuleError::TrailingSlash { name, prefix });
        }

        let url = match Url::parse(target) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => url,
            _ => {
                return Err(RuleError::InvalidTarget {
                    name,
                    target: target.to_string(),
                })
            }
        };
        if url.query().is_some() || url.fragment().is_some() {
            return Err(RuleError::TargetHasQuery {
                name,
                target: target.to_string(),
            });
        }

        let status = match StatusCode::from_u16(status) {
            Ok(code) if matches!(code.as_u16(), 301 | 302 | 303 | 307 | 308) => code,
            _ => return Err(RuleError::InvalidStatus { name, status }),
        };

        Ok(Self {
            name,
            prefix,
            target: url.as_str().trim_end_matches('/').to_string(),
            status,
            preserve_query,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The part of `path` after the prefix, or `None` if the rule does not apply.
    /// An empty remainder is reported as `/`.
    pub fn suffix<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    /// Absolute redirect target for a matching path.
    pub fn location(&self, path: &str, query: Option<&str>) -> Option<String> {
        let suffix = self.suffix(path)?;
        let mut location = String::with_capacity(self.target.len() + suffix.len());
        location.push_str(&self.target);
        location.push_str(suffix);

        if self.preserve_query {
            if let Some(q) = query.filter(|q| !q.is_empty()) {
                location.push('?');
                location.push_str(q);
            }
        }
        Some(location)
    }
}

impl TryFrom<&RedirectRuleConfig> for RedirectRule {
    type Error = RuleError;

    fn try_from(config: &RedirectRuleConfig) -> Result<Self, Self::Error> {
        Self::new(
            config.name.clone(),
            config.prefix.clone(),
            &config.target,
            config.status,
            config.preserve_query,
        )
    }
}

/// Outcome of classifying a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision<'a> {
    /// Answer with a redirect to `location`.
    Redirect {
        rule: &'a str,
        location: String,
        status: StatusCode,
    },
    /// Hand the request to normal routing untouched.
    Continue,
}

/// Immutable redirect table.
#[derive(Debug, Clone)]
pub struct Redirector {
    rules: Vec<RedirectRule>,
    matcher: MatcherSet,
}

impl Redirector {
    /// Build from compiled rules and an explicit matcher.
    pub fn new(mut rules: Vec<RedirectRule>, matcher: MatcherSet) -> Self {
        // Longest prefix first; stable so equal lengths keep config order.
        rules.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { rules, matcher }
    }

    /// Compile the redirect section of the configuration.
    ///
    /// An empty matcher list is derived from the rule prefixes.
    pub fn from_config(config: &RedirectConfig) -> Result<Self, Vec<RuleError>> {
        let mut errors = Vec::new();
        let mut rules = Vec::with_capacity(config.rules.len());

        for rule in &config.rules {
            match RedirectRule::try_from(rule) {
                Ok(r) => rules.push(r),
                Err(e) => errors.push(e),
            }
        }

        let matcher = if config.matcher.is_empty() {
            MatcherSet::for_prefixes(rules.iter().map(|r| r.prefix()))
        } else {
            match MatcherSet::parse(&config.matcher[..]) {
                Ok(m) => m,
                Err(e) => {
                    errors.push(e.into());
                    MatcherSet::default()
                }
            }
        };

        if errors.is_empty() {
            for rule in &rules {
                if !matcher.covers_prefix(rule.prefix()) {
                    errors.push(RuleError::Uncovered(rule.prefix().to_string()));
                }
            }
        }

        if errors.is_empty() {
            Ok(Self::new(rules, matcher))
        } else {
            Err(errors)
        }
    }

    pub fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }

    /// Cheap pre-filter: is the path in the redirector's declared scope?
    pub fn is_candidate(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    /// Classify a request path. Pure function of the path, query and rule table.
    pub fn decide(&self, path: &str, query: Option<&str>) -> RouteDecision<'_> {
        self.rules
            .iter()
            .find_map(|rule| {
                rule.location(path, query).map(|location| RouteDecision::Redirect {
                    rule: rule.name(),
                    location,
                    status: rule.status(),
                })
            })
            .unwrap_or(RouteDecision::Continue)
    }
}
