use std::fmt;

use alloy::primitives::{Address, U256};
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::error::TradeError;
use crate::trade::{AnyTrade, Protocol, TradeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterVersion {
    V2,
    V3,
}

/// Router method a swap message targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapMethod {
    V3ExactInputSingle,
    V3ExactOutputSingle,
    V3ExactInput,
    V3ExactOutput,
    V2SwapExactTokensForTokens,
    V2SwapTokensForExactTokens,
}

impl SwapMethod {
    pub fn select(version: RouterVersion, single_hop: bool, trade_type: TradeType) -> Self {
        match (version, single_hop, trade_type) {
            (RouterVersion::V3, true, TradeType::ExactInput) => Self::V3ExactInputSingle,
            (RouterVersion::V3, true, TradeType::ExactOutput) => Self::V3ExactOutputSingle,
            (RouterVersion::V3, false, TradeType::ExactInput) => Self::V3ExactInput,
            (RouterVersion::V3, false, TradeType::ExactOutput) => Self::V3ExactOutput,
            (RouterVersion::V2, _, TradeType::ExactInput) => Self::V2SwapExactTokensForTokens,
            (RouterVersion::V2, _, TradeType::ExactOutput) => Self::V2SwapTokensForExactTokens,
        }
    }

    /// Identifier understood by the executor backend, e.g. `v3_exactInputSingle`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V3ExactInputSingle => "v3_exactInputSingle",
            Self::V3ExactOutputSingle => "v3_exactOutputSingle",
            Self::V3ExactInput => "v3_exactInput",
            Self::V3ExactOutput => "v3_exactOutput",
            Self::V2SwapExactTokensForTokens => "v2_swapExactTokensForTokens",
            Self::V2SwapTokensForExactTokens => "v2_swapTokensForExactTokens",
        }
    }

    /// Bare router function name.
    pub fn function_name(&self) -> &'static str {
        let id = self.as_str();
        id.split_once('_').map(|(_, name)| name).unwrap_or(id)
    }

    pub fn version(&self) -> RouterVersion {
        match self {
            Self::V2SwapExactTokensForTokens | Self::V2SwapTokensForExactTokens => RouterVersion::V2,
            _ => RouterVersion::V3,
        }
    }
}

impl fmt::Display for SwapMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SwapMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageParams {
    pub method: SwapMethod,
    pub path: Vec<Address>,
    pub amount_in: U256,
    pub amount_out: U256,
}

/// Classifies `trade` and returns the router method, token path and integer amounts.
pub fn swap_message_parameters(trade: &AnyTrade) -> Result<MessageParams, TradeError> {
    let (path, single_hop, version) = match trade {
        AnyTrade::V3(t) => {
            let route = &t.swaps.first().ok_or(TradeError::NoRoutes)?.route;
            let path = route.token_path.iter().map(|t| t.address).collect();
            (path, route.pools.len() == 1, RouterVersion::V3)
        }
        AnyTrade::V2(t) => {
            let path = t.route.path.iter().map(|t| t.address).collect();
            (path, true, RouterVersion::V2)
        }
        AnyTrade::Mixed(t) => {
            let route = &t.swaps.first().ok_or(TradeError::NoRoutes)?.route;
            let path = route.path.iter().map(|t| t.address).collect();
            let version = if t.routes().all(|r| r.protocol() == Protocol::V3) {
                RouterVersion::V3
            } else if t.routes().all(|r| r.protocol() == Protocol::V2) {
                RouterVersion::V2
            } else {
                warn!(
                    routes = t.swaps.len(),
                    "trade mixes router versions, defaulting to V3"
                );
                RouterVersion::V3
            };
            (path, route.pools.len() == 1, version)
        }
    };

    let amount_in = trade
        .input_amount()
        .quotient()
        .ok_or(TradeError::ZeroDenominator { side: "input" })?;
    let amount_out = trade
        .output_amount()
        .quotient()
        .ok_or(TradeError::ZeroDenominator { side: "output" })?;

    Ok(MessageParams {
        method: SwapMethod::select(version, single_hop, trade.trade_type()),
        path,
        amount_in,
        amount_out,
    })
}
