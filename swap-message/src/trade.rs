//! Trade model handed over by the routing SDK.
//!
//! Routes come in three shapes: a V2 trade with a single pair route, a V3 trade
//! with one or more pool routes, and a mixed trade whose routes may combine
//! both pool kinds.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::TradeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl Token {
    pub fn new(chain_id: u64, address: Address, decimals: u8, symbol: &str) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: Some(symbol.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Native { chain_id: u64 },
    Token(Token),
}

impl Currency {
    pub fn is_token(&self) -> bool {
        matches!(self, Currency::Token(_))
    }
}

/// An amount of `currency` expressed as `numerator / denominator` raw units.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyAmount {
    pub currency: Currency,
    pub numerator: U256,
    pub denominator: U256,
}

impl CurrencyAmount {
    pub fn from_raw(currency: Currency, raw: U256) -> Self {
        Self {
            currency,
            numerator: raw,
            denominator: U256::from(1),
        }
    }

    pub fn from_fraction(currency: Currency, numerator: U256, denominator: U256) -> Self {
        Self {
            currency,
            numerator,
            denominator,
        }
    }

    /// Floor of `numerator / denominator`, `None` for a zero denominator.
    pub fn quotient(&self) -> Option<U256> {
        self.numerator.checked_div(self.denominator)
    }
}

/// Slippage tolerance as a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Percent {
    pub numerator: U256,
    pub denominator: U256,
}

impl Percent {
    pub fn from_bps(bps: u64) -> Self {
        Self {
            numerator: U256::from(bps),
            denominator: U256::from(10_000u64),
        }
    }
}

pub trait PoolTokens {
    fn address(&self) -> Address;
    fn token0(&self) -> &Token;
    fn token1(&self) -> &Token;

    fn other_token(&self, token: &Token) -> Option<&Token> {
        if self.token0().address == token.address {
            Some(self.token1())
        } else if self.token1().address == token.address {
            Some(self.token0())
        } else {
            None
        }
    }
}

/// Constant-product pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair {
    pub address: Address,
    pub token0: Token,
    pub token1: Token,
}

/// Concentrated-liquidity pool; `fee` is in hundredths of a bip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pool {
    pub address: Address,
    pub token0: Token,
    pub token1: Token,
    pub fee: u32,
}

impl PoolTokens for Pair {
    fn address(&self) -> Address {
        self.address
    }
    fn token0(&self) -> &Token {
        &self.token0
    }
    fn token1(&self) -> &Token {
        &self.token1
    }
}

impl PoolTokens for Pool {
    fn address(&self) -> Address {
        self.address
    }
    fn token0(&self) -> &Token {
        &self.token0
    }
    fn token1(&self) -> &Token {
        &self.token1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyPool {
    V2(Pair),
    V3(Pool),
}

impl PoolTokens for AnyPool {
    fn address(&self) -> Address {
        match self {
            AnyPool::V2(pair) => pair.address,
            AnyPool::V3(pool) => pool.address,
        }
    }
    fn token0(&self) -> &Token {
        match self {
            AnyPool::V2(pair) => &pair.token0,
            AnyPool::V3(pool) => &pool.token0,
        }
    }
    fn token1(&self) -> &Token {
        match self {
            AnyPool::V2(pair) => &pair.token1,
            AnyPool::V3(pool) => &pool.token1,
        }
    }
}

/// Walks `pools` starting at `input` and returns every token visited.
fn walk_path<P: PoolTokens>(pools: &[P], input: &Token) -> Result<Vec<Token>, TradeError> {
    if pools.is_empty() {
        return Err(TradeError::EmptyRoute);
    }
    let mut path = Vec::with_capacity(pools.len() + 1);
    path.push(input.clone());
    let mut current = input;
    for pool in pools {
        let next = pool.other_token(current).ok_or(TradeError::InvalidPath {
            pool: pool.address(),
            token: current.address,
        })?;
        path.push(next.clone());
        current = next;
    }
    Ok(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    V2,
    V3,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct V2Route {
    pub pairs: Vec<Pair>,
    pub path: Vec<Token>,
}

impl V2Route {
    pub fn new(pairs: Vec<Pair>, input: &Token) -> Result<Self, TradeError> {
        let path = walk_path(&pairs, input)?;
        Ok(Self { pairs, path })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct V3Route {
    pub pools: Vec<Pool>,
    pub token_path: Vec<Token>,
}

impl V3Route {
    pub fn new(pools: Vec<Pool>, input: &Token) -> Result<Self, TradeError> {
        let token_path = walk_path(&pools, input)?;
        Ok(Self { pools, token_path })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MixedRoute {
    pub pools: Vec<AnyPool>,
    pub path: Vec<Token>,
}

impl MixedRoute {
    pub fn new(pools: Vec<AnyPool>, input: &Token) -> Result<Self, TradeError> {
        let path = walk_path(&pools, input)?;
        Ok(Self { pools, path })
    }

    pub fn protocol(&self) -> Protocol {
        if self.pools.is_empty() {
            Protocol::Mixed
        } else if self.pools.iter().all(|p| matches!(p, AnyPool::V2(_))) {
            Protocol::V2
        } else if self.pools.iter().all(|p| matches!(p, AnyPool::V3(_))) {
            Protocol::V3
        } else {
            Protocol::Mixed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Swap<R> {
    pub route: R,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct V2Trade {
    pub route: V2Route,
    pub trade_type: TradeType,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct V3Trade {
    pub swaps: Vec<Swap<V3Route>>,
    pub trade_type: TradeType,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MixedTrade {
    pub swaps: Vec<Swap<MixedRoute>>,
    pub trade_type: TradeType,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
}

impl MixedTrade {
    pub fn routes(&self) -> impl Iterator<Item = &MixedRoute> {
        self.swaps.iter().map(|swap| &swap.route)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyTrade {
    V2(V2Trade),
    V3(V3Trade),
    Mixed(MixedTrade),
}

impl AnyTrade {
    pub fn trade_type(&self) -> TradeType {
        match self {
            AnyTrade::V2(t) => t.trade_type,
            AnyTrade::V3(t) => t.trade_type,
            AnyTrade::Mixed(t) => t.trade_type,
        }
    }

    pub fn input_amount(&self) -> &CurrencyAmount {
        match self {
            AnyTrade::V2(t) => &t.input_amount,
            AnyTrade::V3(t) => &t.input_amount,
            AnyTrade::Mixed(t) => &t.input_amount,
        }
    }

    pub fn output_amount(&self) -> &CurrencyAmount {
        match self {
            AnyTrade::V2(t) => &t.output_amount,
            AnyTrade::V3(t) => &t.output_amount,
            AnyTrade::Mixed(t) => &t.output_amount,
        }
    }

    pub fn route_count(&self) -> usize {
        match self {
            AnyTrade::V2(_) => 1,
            AnyTrade::V3(t) => t.swaps.len(),
            AnyTrade::Mixed(t) => t.swaps.len(),
        }
    }

    /// Fee tier of each hop on the first route, `None` for a constant-product hop.
    pub fn first_route_fees(&self) -> Result<Vec<Option<u32>>, TradeError> {
        let fees = match self {
            AnyTrade::V2(t) => vec![None; t.route.pairs.len()],
            AnyTrade::V3(t) => {
                let route = &t.swaps.first().ok_or(TradeError::NoRoutes)?.route;
                route.pools.iter().map(|pool| Some(pool.fee)).collect()
            }
            AnyTrade::Mixed(t) => {
                let route = &t.swaps.first().ok_or(TradeError::NoRoutes)?.route;
                route
                    .pools
                    .iter()
                    .map(|pool| match pool {
                        AnyPool::V2(_) => None,
                        AnyPool::V3(pool) => Some(pool.fee),
                    })
                    .collect()
            }
        };
        Ok(fees)
    }

    /// Maximum input the trader spends once slippage is applied.
    pub fn maximum_amount_in(&self, slippage: &Percent) -> Result<CurrencyAmount, TradeError> {
        let input = self.input_amount();
        if self.trade_type() == TradeType::ExactInput {
            return Ok(input.clone());
        }
        let raw = input
            .quotient()
            .ok_or(TradeError::ZeroDenominator { side: "input" })?;
        let adjusted = slippage
            .denominator
            .checked_add(slippage.numerator)
            .and_then(|factor| factor.checked_mul(raw))
            .ok_or(TradeError::AmountOverflow)?
            .checked_div(slippage.denominator)
            .ok_or(TradeError::ZeroDenominator { side: "slippage" })?;
        Ok(CurrencyAmount::from_raw(input.currency.clone(), adjusted))
    }
}
