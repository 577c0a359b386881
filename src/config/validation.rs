//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile redirect rules and the matcher once to surface their errors
//! - Resolve the chain section (unknown network, placeholder addresses)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::chain::{ActiveChain, ChainError};
use crate::config::schema::EdgeConfig;
use crate::http::passthrough::{parse_origin, UpstreamError};
use crate::identicon::{MAX_SIZE, MIN_SIZE};
use crate::observability::logging::filter_directives;
use crate::routing::{Redirector, RuleError};

/// A single semantic configuration defect.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener: invalid bind address '{0}'")]
    BindAddress(String),

    #[error("timeouts: {0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("redirects: {0}")]
    Redirect(#[from] RuleError),

    #[error("chain: {0}")]
    Chain(#[from] ChainError),

    #[error("frontend: {0}")]
    Frontend(#[from] UpstreamError),

    #[error("identicon: default size {0} outside {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    IdenticonSize(u32),

    #[error("observability: invalid log level '{0}'")]
    LogLevel(String),

    #[error("observability: invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Check every section of `config`, collecting all defects.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.upstream_connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_connect_secs"));
    }

    if let Err(rule_errors) = Redirector::from_config(&config.redirects) {
        errors.extend(rule_errors.into_iter().map(ValidationError::from));
    }

    if let Err(chain_errors) = ActiveChain::from_config(&config.chain) {
        errors.extend(chain_errors.into_iter().map(ValidationError::from));
    }

    if let Some(origin) = &config.frontend.origin {
        if let Err(e) = parse_origin(origin) {
            errors.push(e.into());
        }
    }

    if !(MIN_SIZE..=MAX_SIZE).contains(&config.identicon.default_size) {
        errors.push(ValidationError::IdenticonSize(config.identicon.default_size));
    }

    if EnvFilter::try_new(filter_directives(&config.observability.log_level)).is_err() {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RedirectRuleConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&EdgeConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = EdgeConfig::default();
        config.listener.bind_address = "localhost".into();
        config.timeouts.request_secs = 0;
        config.redirects.rules.push(RedirectRuleConfig {
            name: "broken".into(),
            prefix: "/docs".into(),
            target: "docs.diviswap.io".into(),
            status: 200,
            preserve_query: true,
        });
        config.chain.factory_address = Some("0x0000000000000000000000000000000000000000".into());
        config.frontend.origin = Some("https://frontend".into());
        config.identicon.default_size = 4;

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::BindAddress(_)));
        assert!(matches!(errors[1], ValidationError::ZeroTimeout("request_secs")));
        assert!(matches!(
            errors[2],
            ValidationError::Redirect(RuleError::InvalidTarget { .. })
        ));
        assert!(matches!(
            errors[3],
            ValidationError::Chain(ChainError::ZeroFactoryAddress)
        ));
        assert!(matches!(
            errors[4],
            ValidationError::Frontend(UpstreamError::UnsupportedScheme(_))
        ));
        assert!(matches!(errors[5], ValidationError::IdenticonSize(4)));
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_uncovered_rule() {
        let mut config = EdgeConfig::default();
        config.redirects.rules.push(RedirectRuleConfig {
            name: "docs".into(),
            prefix: "/docs".into(),
            target: "https://docs.diviswap.io".into(),
            status: 308,
            preserve_query: false,
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "redirects: matcher does not cover prefix '/docs' and its sub-paths"
        );
    }

    #[test]
    fn test_identicon_size_message() {
        let mut config = EdgeConfig::default();
        config.identicon.default_size = 1024;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors[0].to_string(),
            "identicon: default size 1024 outside 8..=512"
        );
    }

    #[test]
    fn test_log_level_checked_as_filter() {
        let mut config = EdgeConfig::default();
        config.observability.log_level = "warn,hyper=off".into();
        assert!(validate_config(&config).is_ok());

        config.observability.log_level = "verbose".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(&errors[0], ValidationError::LogLevel(level) if level == "verbose"));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = EdgeConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::MetricsAddress(_)));
    }
}
