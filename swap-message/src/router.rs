use std::collections::HashMap;

use alloy::primitives::{address, Address};

use crate::trade::AnyTrade;

pub const CHAIN_MAINNET: u64 = 1;
pub const CHAIN_GOERLI: u64 = 5;
pub const CHAIN_OPTIMISM: u64 = 10;
pub const CHAIN_POLYGON: u64 = 137;
pub const CHAIN_ARBITRUM: u64 = 42161;

const UNISWAP_V2_ROUTER_02: Address = address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");
const UNISWAP_V3_SWAP_ROUTER: Address = address!("E592427A0AEce92De3Edee1F18E0157C05861564");
const UNISWAP_SWAP_ROUTER_02: Address = address!("68b3465833fb72A70ecDF485E0e4C7bD8665Fc45");

pub static V2_ROUTER_ADDRESSES: &[(u64, Address)] = &[
    (CHAIN_MAINNET, UNISWAP_V2_ROUTER_02),
    (CHAIN_GOERLI, UNISWAP_V2_ROUTER_02),
];

pub static V3_ROUTER_ADDRESSES: &[(u64, Address)] = &[
    (CHAIN_MAINNET, UNISWAP_V3_SWAP_ROUTER),
    (CHAIN_GOERLI, UNISWAP_V3_SWAP_ROUTER),
    (CHAIN_OPTIMISM, UNISWAP_V3_SWAP_ROUTER),
    (CHAIN_POLYGON, UNISWAP_V3_SWAP_ROUTER),
    (CHAIN_ARBITRUM, UNISWAP_V3_SWAP_ROUTER),
];

pub static SWAP_ROUTER_ADDRESSES: &[(u64, Address)] = &[
    (CHAIN_MAINNET, UNISWAP_SWAP_ROUTER_02),
    (CHAIN_GOERLI, UNISWAP_SWAP_ROUTER_02),
    (CHAIN_OPTIMISM, UNISWAP_SWAP_ROUTER_02),
    (CHAIN_POLYGON, UNISWAP_SWAP_ROUTER_02),
    (CHAIN_ARBITRUM, UNISWAP_SWAP_ROUTER_02),
];

/// Call interface a router address speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterAbi {
    /// Uniswap V2 Router02, deadline as a trailing argument.
    V2Router02,
    /// Uniswap V3 SwapRouter, deadline inside the params struct.
    SwapRouter,
    /// SwapRouter02, V2 and V3 methods without a deadline; deadline goes through `multicall`.
    SwapRouter02,
}

/// Deployed contract addresses keyed by chain id.
///
/// Router tables default to the public Uniswap deployments. Executor (the
/// EIP-712 verifying contract that receives approvals and swap messages) is
/// deployment specific and registered through configuration.
#[derive(Debug, Clone)]
pub struct AddressBook {
    v2_routers: HashMap<u64, Address>,
    v3_routers: HashMap<u64, Address>,
    swap_routers: HashMap<u64, Address>,
    executors: HashMap<u64, Address>,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self {
            v2_routers: V2_ROUTER_ADDRESSES.iter().copied().collect(),
            v3_routers: V3_ROUTER_ADDRESSES.iter().copied().collect(),
            swap_routers: SWAP_ROUTER_ADDRESSES.iter().copied().collect(),
            executors: HashMap::new(),
        }
    }
}

impl AddressBook {
    pub fn with_executor(mut self, chain_id: u64, executor: Address) -> Self {
        self.executors.insert(chain_id, executor);
        self
    }

    pub fn executor(&self, chain_id: Option<u64>) -> Option<Address> {
        self.executors.get(&chain_id?).copied()
    }

    /// Interface of a router listed in any of the tables, `None` for an unlisted address.
    pub fn router_abi(&self, router: Address) -> Option<RouterAbi> {
        let listed = |table: &HashMap<u64, Address>| table.values().any(|a| *a == router);
        if listed(&self.swap_routers) {
            Some(RouterAbi::SwapRouter02)
        } else if listed(&self.v3_routers) {
            Some(RouterAbi::SwapRouter)
        } else if listed(&self.v2_routers) {
            Some(RouterAbi::V2Router02)
        } else {
            None
        }
    }

    /// Router a trade of this variant is sent to on `chain_id`.
    pub fn swap_router_address(
        &self,
        trade: Option<&AnyTrade>,
        chain_id: Option<u64>,
    ) -> Option<Address> {
        let chain_id = chain_id?;
        let table = match trade? {
            AnyTrade::V2(_) => &self.v2_routers,
            AnyTrade::V3(_) => &self.v3_routers,
            AnyTrade::Mixed(_) => &self.swap_routers,
        };
        table.get(&chain_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::fixtures::*;
    use crate::trade::{AnyPool, TradeType};

    #[test]
    fn test_router_per_variant() {
        let book = AddressBook::default();
        let pool = v3_pool(&usdc(), &weth(), 500, Address::repeat_byte(1));
        let pair = v2_pair(&usdc(), &weth(), Address::repeat_byte(2));

        let v2 = AnyTrade::V2(v2_trade(vec![pair], TradeType::ExactInput));
        let v3 = AnyTrade::V3(v3_trade(vec![pool.clone()], TradeType::ExactInput));
        let mixed = AnyTrade::Mixed(mixed_trade(
            vec![vec![AnyPool::V3(pool)]],
            TradeType::ExactInput,
        ));

        assert_eq!(
            book.swap_router_address(Some(&v2), Some(CHAIN_MAINNET)),
            Some(UNISWAP_V2_ROUTER_02)
        );
        assert_eq!(
            book.swap_router_address(Some(&v3), Some(CHAIN_MAINNET)),
            Some(UNISWAP_V3_SWAP_ROUTER)
        );
        assert_eq!(
            book.swap_router_address(Some(&mixed), Some(CHAIN_ARBITRUM)),
            Some(UNISWAP_SWAP_ROUTER_02)
        );
    }

    #[test]
    fn test_unknown_chain_is_unavailable() {
        let book = AddressBook::default();
        let pair = v2_pair(&usdc(), &weth(), Address::repeat_byte(2));
        let v2 = AnyTrade::V2(v2_trade(vec![pair], TradeType::ExactInput));

        // V2 router is only listed on mainnet and goerli
        assert_eq!(book.swap_router_address(Some(&v2), Some(CHAIN_ARBITRUM)), None);
        assert_eq!(book.swap_router_address(Some(&v2), Some(999_999)), None);
        assert_eq!(book.swap_router_address(Some(&v2), None), None);
        assert_eq!(book.swap_router_address(None, Some(CHAIN_MAINNET)), None);
    }

    #[test]
    fn test_router_abi() {
        let book = AddressBook::default();
        assert_eq!(book.router_abi(UNISWAP_V2_ROUTER_02), Some(RouterAbi::V2Router02));
        assert_eq!(book.router_abi(UNISWAP_V3_SWAP_ROUTER), Some(RouterAbi::SwapRouter));
        assert_eq!(book.router_abi(UNISWAP_SWAP_ROUTER_02), Some(RouterAbi::SwapRouter02));
        assert_eq!(book.router_abi(Address::repeat_byte(0x01)), None);
    }

    #[test]
    fn test_executor_lookup() {
        let executor = Address::repeat_byte(0xee);
        let book = AddressBook::default().with_executor(CHAIN_GOERLI, executor);
        assert_eq!(book.executor(Some(CHAIN_GOERLI)), Some(executor));
        assert_eq!(book.executor(Some(CHAIN_MAINNET)), None);
        assert_eq!(book.executor(None), None);
    }
}
