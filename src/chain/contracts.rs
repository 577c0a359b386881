//! Contract interfaces of the Uniswap-V1-style exchange.
//!
//! The factory deploys one exchange per token; every exchange trades its
//! token against the native currency.

use alloy::primitives::hex;
use alloy::sol;
use alloy::sol_types::{SolCall, SolEvent};
use serde::Serialize;

sol! {
    /// Exchange factory.
    interface IUniswapExchangeFactory {
        event NewExchange(address indexed token, address indexed exchange);

        function initializeFactory(address template) external;
        function createExchange(address token) external returns (address exchange);
        function getExchange(address token) external view returns (address exchange);
        function getToken(address exchange) external view returns (address token);
        function getTokenWithId(uint256 token_id) external view returns (address token);
        function exchangeTemplate() external view returns (address template);
        function tokenCount() external view returns (uint256 count);
    }

    /// Per-token exchange.
    interface IUniswapExchange {
        event TokenPurchase(address indexed buyer, uint256 indexed eth_sold, uint256 indexed tokens_bought);
        event EthPurchase(address indexed buyer, uint256 indexed tokens_sold, uint256 indexed eth_bought);
        event AddLiquidity(address indexed provider, uint256 indexed eth_amount, uint256 indexed token_amount);
        event RemoveLiquidity(address indexed provider, uint256 indexed eth_amount, uint256 indexed token_amount);

        function tokenAddress() external view returns (address token);
        function factoryAddress() external view returns (address factory);

        function addLiquidity(uint256 min_liquidity, uint256 max_tokens, uint256 deadline) external payable returns (uint256 minted);
        function removeLiquidity(uint256 amount, uint256 min_eth, uint256 min_tokens, uint256 deadline) external returns (uint256 eth_amount, uint256 token_amount);

        function getEthToTokenInputPrice(uint256 eth_sold) external view returns (uint256 tokens_bought);
        function getEthToTokenOutputPrice(uint256 tokens_bought) external view returns (uint256 eth_sold);
        function getTokenToEthInputPrice(uint256 tokens_sold) external view returns (uint256 eth_bought);
        function getTokenToEthOutputPrice(uint256 eth_bought) external view returns (uint256 tokens_sold);

        function ethToTokenSwapInput(uint256 min_tokens, uint256 deadline) external payable returns (uint256 tokens_bought);
        function ethToTokenSwapOutput(uint256 tokens_bought, uint256 deadline) external payable returns (uint256 eth_sold);
        function tokenToEthSwapInput(uint256 tokens_sold, uint256 min_eth, uint256 deadline) external returns (uint256 eth_bought);
        function tokenToEthSwapOutput(uint256 eth_bought, uint256 max_tokens, uint256 deadline) external returns (uint256 tokens_sold);
        function tokenToTokenSwapInput(uint256 tokens_sold, uint256 min_tokens_bought, uint256 min_eth_bought, uint256 deadline, address token_addr) external returns (uint256 tokens_bought);
        function tokenToTokenSwapOutput(uint256 tokens_bought, uint256 max_tokens_sold, uint256 max_eth_sold, uint256 deadline, address token_addr) external returns (uint256 tokens_sold);

        function balanceOf(address owner) external view returns (uint256 balance);
        function totalSupply() external view returns (uint256 supply);
    }
}

/// A function of a contract interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionEntry {
    pub signature: &'static str,
    /// 4-byte selector, 0x-prefixed hex.
    pub selector: String,
}

/// An event of a contract interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEntry {
    pub signature: &'static str,
    /// keccak256 of the signature, 0x-prefixed hex.
    pub topic: String,
}

/// A named contract interface table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractInterface {
    pub name: &'static str,
    pub functions: Vec<FunctionEntry>,
    pub events: Vec<EventEntry>,
}

impl ContractInterface {
    pub fn function(&self, signature: &str) -> Option<&FunctionEntry> {
        self.functions.iter().find(|f| f.signature == signature)
    }
}

fn function<C: SolCall>() -> FunctionEntry {
    FunctionEntry {
        signature: C::SIGNATURE,
        selector: hex::encode_prefixed(C::SELECTOR),
    }
}

fn event<E: SolEvent>() -> EventEntry {
    EventEntry {
        signature: E::SIGNATURE,
        topic: hex::encode_prefixed(E::SIGNATURE_HASH),
    }
}

/// Interface table of the exchange factory.
pub fn factory_interface() -> ContractInterface {
    use IUniswapExchangeFactory as F;

    ContractInterface {
        name: "IUniswapExchangeFactory",
        functions: vec![
            function::<F::initializeFactoryCall>(),
            function::<F::createExchangeCall>(),
            function::<F::getExchangeCall>(),
            function::<F::getTokenCall>(),
            function::<F::getTokenWithIdCall>(),
            function::<F::exchangeTemplateCall>(),
            function::<F::tokenCountCall>(),
        ],
        events: vec![event::<F::NewExchange>()],
    }
}

/// Interface table of a per-token exchange.
pub fn exchange_interface() -> ContractInterface {
    use IUniswapExchange as X;

    ContractInterface {
        name: "IUniswapExchange",
        functions: vec![
            function::<X::tokenAddressCall>(),
            function::<X::factoryAddressCall>(),
            function::<X::addLiquidityCall>(),
            function::<X::removeLiquidityCall>(),
            function::<X::getEthToTokenInputPriceCall>(),
            function::<X::getEthToTokenOutputPriceCall>(),
            function::<X::getTokenToEthInputPriceCall>(),
            function::<X::getTokenToEthOutputPriceCall>(),
            function::<X::ethToTokenSwapInputCall>(),
            function::<X::ethToTokenSwapOutputCall>(),
            function::<X::tokenToEthSwapInputCall>(),
            function::<X::tokenToEthSwapOutputCall>(),
            function::<X::tokenToTokenSwapInputCall>(),
            function::<X::tokenToTokenSwapOutputCall>(),
            function::<X::balanceOfCall>(),
            function::<X::totalSupplyCall>(),
        ],
        events: vec![
            event::<X::TokenPurchase>(),
            event::<X::EthPurchase>(),
            event::<X::AddLiquidity>(),
            event::<X::RemoveLiquidity>(),
        ],
    }
}

/// Every interface the frontend consumes.
pub fn interfaces() -> Vec<ContractInterface> {
    vec![factory_interface(), exchange_interface()]
}
