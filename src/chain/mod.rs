//! Chain and contract-interface tables.
//!
//! # Data Flow
//! ```text
//! ChainConfig (network, rpc_url, factory_address)
//!     → types.rs (static chain definitions)
//!     → contracts.rs (static interface tables)
//!     → ActiveChain (resolved once at startup, read-only afterwards)
//!     → served as JSON to the frontend
//! ```
//!
//! # Design Decisions
//! - Tables are compile-time constants
//! - No RPC traffic: addresses and endpoints are only validated, never called
//! - A zero factory address is a configuration defect caught at startup

pub mod contracts;
pub mod types;

use alloy::primitives::Address;
use serde::Serialize;
use url::Url;

use crate::config::schema::ChainConfig;

pub use contracts::{ContractInterface, EventEntry, FunctionEntry};
pub use types::{BlockExplorer, Chain, ChainError, ChainId, NativeCurrency, CHAINS, CHILIZ, SPICY};

/// The network selected by configuration.
#[derive(Debug, Clone)]
pub struct ActiveChain {
    chain: &'static Chain,
    rpc_url: String,
    factory: Option<Address>,
}

impl ActiveChain {
    /// Resolve the chain section of the configuration, reporting every defect.
    pub fn from_config(config: &ChainConfig) -> Result<Self, Vec<ChainError>> {
        let mut errors = Vec::new();

        let chain = Chain::by_network(&config.network);
        if chain.is_none() {
            errors.push(ChainError::UnknownNetwork(config.network.clone()));
        }

        let rpc_url = match (&config.rpc_url, chain) {
            (Some(url), _) => {
                if let Err(e) = parse_rpc_url(url) {
                    errors.push(e);
                }
                url.clone()
            }
            (None, Some(chain)) => chain.default_rpc_url().to_string(),
            (None, None) => String::new(),
        };

        let factory = match config.factory_address.as_deref().map(parse_factory_address) {
            Some(Ok(address)) => Some(address),
            Some(Err(e)) => {
                errors.push(e);
                None
            }
            None => None,
        };

        match chain {
            Some(chain) if errors.is_empty() => Ok(Self {
                chain,
                rpc_url,
                factory,
            }),
            _ => Err(errors),
        }
    }

    pub fn chain(&self) -> &'static Chain {
        self.chain
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn factory(&self) -> Option<Address> {
        self.factory
    }

    /// Serializable snapshot for the frontend.
    pub fn info(&self) -> ChainInfo {
        ChainInfo {
            chain: *self.chain,
            rpc_url: self.rpc_url.clone(),
            factory_address: self.factory.map(|a| a.to_checksum(None)),
            interfaces: contracts::interfaces(),
        }
    }
}

/// JSON view of the active chain.
#[derive(Debug, Clone, Serialize)]
pub struct ChainInfo {
    #[serde(flatten)]
    pub chain: Chain,
    pub rpc_url: String,
    pub factory_address: Option<String>,
    pub interfaces: Vec<ContractInterface>,
}

fn parse_rpc_url(raw: &str) -> Result<Url, ChainError> {
    let url = Url::parse(raw).map_err(|e| ChainError::InvalidRpcUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" | "ws" | "wss" => Ok(url),
        other => Err(ChainError::InvalidRpcUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn parse_factory_address(raw: &str) -> Result<Address, ChainError> {
    let address = raw
        .parse::<Address>()
        .map_err(|e| ChainError::InvalidFactoryAddress {
            address: raw.to_string(),
            reason: e.to_string(),
        })?;
    if address.is_zero() {
        return Err(ChainError::ZeroFactoryAddress);
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(network: &str, factory: Option<&str>) -> ChainConfig {
        ChainConfig {
            network: network.to_string(),
            rpc_url: None,
            factory_address: factory.map(str::to_string),
        }
    }

    #[test]
    fn test_default_resolves_to_chiliz() {
        let active = ActiveChain::from_config(&ChainConfig::default()).unwrap();
        assert_eq!(active.chain().id, ChainId(88_888));
        assert_eq!(active.rpc_url(), "https://rpc.ankr.com/chiliz");
        assert!(active.factory().is_none());
    }

    #[test]
    fn test_factory_address() {
        let active = ActiveChain::from_config(&config(
            "spicy",
            Some("0x1111111111111111111111111111111111111111"),
        ))
        .unwrap();
        assert_eq!(active.factory(), Some(Address::repeat_byte(0x11)));
    }

    #[test]
    fn test_placeholder_address_rejected() {
        let errors = ActiveChain::from_config(&config(
            "chiliz",
            Some("0x0000000000000000000000000000000000000000"),
        ))
        .unwrap_err();
        assert_eq!(errors, vec![ChainError::ZeroFactoryAddress]);

        let errors = ActiveChain::from_config(&config("chiliz", Some("0xTODO"))).unwrap_err();
        assert!(matches!(errors[0], ChainError::InvalidFactoryAddress { .. }));
    }

    #[test]
    fn test_all_errors_reported() {
        let mut cfg = config("ropsten", Some("0x00"));
        cfg.rpc_url = Some("ftp://node".into());
        let errors = ActiveChain::from_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], ChainError::UnknownNetwork("ropsten".into()));
    }

    #[test]
    fn test_info_json() {
        let active = ActiveChain::from_config(&config(
            "chiliz",
            Some("0x1111111111111111111111111111111111111111"),
        ))
        .unwrap();
        let json = serde_json::to_value(active.info()).unwrap();
        assert_eq!(json["id"], 88_888);
        assert_eq!(json["network"], "chiliz");
        assert_eq!(json["native_currency"]["symbol"], "CHZ");
        assert_eq!(
            json["factory_address"],
            "0x1111111111111111111111111111111111111111"
        );
        assert_eq!(json["interfaces"].as_array().unwrap().len(), 2);
    }
}
