//! Chain definitions and error types.

use serde::Serialize;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Native gas token of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Block explorer reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockExplorer {
    pub name: &'static str,
    pub url: &'static str,
}

/// Static description of a network the exchange is deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub id: ChainId,
    pub name: &'static str,
    /// Short name used in configuration.
    pub network: &'static str,
    pub native_currency: NativeCurrency,
    /// Public RPC endpoints, preferred first.
    pub rpc_urls: &'static [&'static str],
    pub block_explorer: BlockExplorer,
    pub testnet: bool,
}

const CHZ: NativeCurrency = NativeCurrency {
    name: "Chiliz",
    symbol: "CHZ",
    decimals: 18,
};

/// Chiliz Chain mainnet.
pub const CHILIZ: Chain = Chain {
    id: ChainId(88_888),
    name: "Chiliz Chain",
    network: "chiliz",
    native_currency: CHZ,
    rpc_urls: &[
        "https://rpc.ankr.com/chiliz",
        "https://chiliz-rpc.publicnode.com",
    ],
    block_explorer: BlockExplorer {
        name: "Chiliz Explorer",
        url: "https://chiliscan.com",
    },
    testnet: false,
};

/// Chiliz Spicy testnet.
pub const SPICY: Chain = Chain {
    id: ChainId(88_882),
    name: "Chiliz Spicy Testnet",
    network: "spicy",
    native_currency: CHZ,
    rpc_urls: &[
        "https://spicy-rpc.chiliz.com",
        "https://chiliz-spicy-rpc.publicnode.com",
    ],
    block_explorer: BlockExplorer {
        name: "Chiliz Explorer",
        url: "https://testnet.chiliscan.com",
    },
    testnet: true,
};

/// Every supported network.
pub const CHAINS: &[Chain] = &[CHILIZ, SPICY];

impl Chain {
    /// Look up a chain by its configuration name.
    pub fn by_network(network: &str) -> Option<&'static Chain> {
        CHAINS
            .iter()
            .find(|c| c.network.eq_ignore_ascii_case(network))
    }

    /// Look up a chain by id.
    pub fn by_id(id: impl Into<ChainId>) -> Option<&'static Chain> {
        let id = id.into();
        CHAINS.iter().find(|c| c.id == id)
    }

    /// The preferred public RPC endpoint.
    pub fn default_rpc_url(&self) -> &'static str {
        self.rpc_urls[0]
    }
}

/// Errors found while resolving the chain configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("invalid factory address '{address}': {reason}")]
    InvalidFactoryAddress { address: String, reason: String },

    #[error("factory address is the zero address (unfilled placeholder)")]
    ZeroFactoryAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(88_888u64);
        assert_eq!(chain_id.0, 88_888);
        assert_eq!(u64::from(chain_id), 88_888);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Chain::by_network("chiliz"), Some(&CHILIZ));
        assert_eq!(Chain::by_network("SPICY"), Some(&SPICY));
        assert_eq!(Chain::by_network("mainnet"), None);
        assert_eq!(Chain::by_id(88_882u64).map(|c| c.network), Some("spicy"));
        assert!(Chain::by_id(1u64).is_none());
    }

    #[test]
    fn test_tables_are_consistent() {
        for chain in CHAINS {
            assert!(!chain.rpc_urls.is_empty());
            assert!(chain.default_rpc_url().starts_with("https://"));
            assert_eq!(chain.native_currency.decimals, 18);
        }
        assert!(!CHILIZ.testnet);
        assert!(SPICY.testnet);
    }

    #[test]
    fn test_error_display() {
        let err = ChainError::UnknownNetwork("goerli".into());
        assert_eq!(err.to_string(), "unknown network 'goerli'");
    }
}
