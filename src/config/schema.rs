//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge
//! service. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Redirect rules and the matcher that scopes them.
    pub redirects: RedirectConfig,

    /// Where pass-through requests are sent.
    pub frontend: FrontendConfig,

    /// Active chain and contract addresses.
    pub chain: ChainConfig,

    /// Identicon rendering defaults.
    pub identicon: IdenticonConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Connection establishment timeout towards the frontend origin in seconds.
    pub upstream_connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_connect_secs: 5,
        }
    }
}

/// Redirect rules plus the declarative matcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Path patterns that invoke the redirector (`/academy`, `/academy/*`).
    /// Derived from the rules when left empty.
    pub matcher: Vec<String>,

    /// Redirect rules. Longest prefix wins.
    pub rules: Vec<RedirectRuleConfig>,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            matcher: vec!["/academy".to_string(), "/academy/*".to_string()],
            rules: vec![RedirectRuleConfig {
                name: "academy".to_string(),
                prefix: "/academy".to_string(),
                target: "https://academy.diviswap.io".to_string(),
                status: default_redirect_status(),
                preserve_query: true,
            }],
        }
    }
}

/// A single prefix -> external URL rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedirectRuleConfig {
    /// Rule identifier for logging/metrics.
    pub name: String,

    /// Path prefix, matched on segment boundaries.
    pub prefix: String,

    /// Absolute base URL the suffix is appended to.
    pub target: String,

    /// Redirect status code (301, 302, 303, 307 or 308).
    #[serde(default = "default_redirect_status")]
    pub status: u16,

    /// Forward the original query string to the target.
    #[serde(default = "default_preserve_query")]
    pub preserve_query: bool,
}

fn default_redirect_status() -> u16 {
    307
}

fn default_preserve_query() -> bool {
    true
}

/// Frontend origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FrontendConfig {
    /// Origin receiving every request that is not redirected
    /// (e.g. "http://127.0.0.1:3001"). Without it, the not-found page is served.
    pub origin: Option<String>,
}

/// Chain selection and contract addresses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Network name ("chiliz" or "spicy").
    pub network: String,

    /// Overrides the network's default RPC URL.
    pub rpc_url: Option<String>,

    /// Exchange factory address on the selected network.
    pub factory_address: Option<String>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: "chiliz".to_string(),
            rpc_url: None,
            factory_address: None,
        }
    }
}

/// Identicon rendering defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdenticonConfig {
    /// Diameter used when the request carries no `size`.
    pub default_size: u32,
}

impl Default for IdenticonConfig {
    fn default() -> Self {
        Self { default_size: 24 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
