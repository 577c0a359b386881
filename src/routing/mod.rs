//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → matcher.rs (is the path in the declared redirect scope?)
//!     → router.rs (evaluate redirect rules)
//!     → Return: Redirect { location, status } or Continue
//!
//! Rule Compilation (at startup):
//!     RedirectRuleConfig[]
//!     → Validate prefixes, targets, statuses
//!     → Sort by prefix length
//!     → Freeze as immutable Redirector
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always yields the same decision
//! - Longest prefix wins

pub mod matcher;
pub mod router;

pub use matcher::{Matcher, MatcherSet, PathPattern, PatternError};
pub use router::{RedirectRule, Redirector, RouteDecision, RuleError};
