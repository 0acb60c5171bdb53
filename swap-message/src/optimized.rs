use tracing::{debug, error};

use crate::adapters::allowance::AllowanceState;
use crate::error::TradeError;
use crate::trade::{AnyPool, AnyTrade, MixedTrade, Protocol, Swap, V2Route, V2Trade, V3Route, V3Trade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapRouterVersion {
    V2,
    V3,
    V2V3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapApprovalStates {
    pub v2: AllowanceState,
    pub v3: AllowanceState,
    pub v2v3: AllowanceState,
}

/// Every router version approves the same executor, so one state covers all three.
pub fn swap_approval_states(executor_allowance: AllowanceState) -> SwapApprovalStates {
    SwapApprovalStates {
        v2: executor_allowance,
        v3: executor_allowance,
        v2v3: executor_allowance,
    }
}

/// Picks the router version needing the smallest transaction given current approvals.
pub fn tx_optimized_swap_router(
    only_v2_routes: bool,
    only_v3_routes: bool,
    trade_has_splits: bool,
    approvals: SwapApprovalStates,
) -> Option<SwapRouterVersion> {
    if [approvals.v2, approvals.v3, approvals.v2v3].contains(&AllowanceState::Pending) {
        return None;
    }
    if approvals.v2v3 == AllowanceState::Approved {
        return Some(SwapRouterVersion::V2V3);
    }
    if !trade_has_splits {
        if only_v2_routes && approvals.v2 == AllowanceState::Approved {
            return Some(SwapRouterVersion::V2);
        }
        if only_v3_routes && approvals.v3 == AllowanceState::Approved {
            return Some(SwapRouterVersion::V3);
        }
    }
    Some(SwapRouterVersion::V2V3)
}

fn to_v2_trade(trade: &MixedTrade) -> Result<AnyTrade, TradeError> {
    let route = &trade.swaps.first().ok_or(TradeError::NoRoutes)?.route;
    let input = route.path.first().ok_or(TradeError::EmptyRoute)?;
    let pairs = route
        .pools
        .iter()
        .filter_map(|pool| match pool {
            AnyPool::V2(pair) => Some(pair.clone()),
            AnyPool::V3(_) => None,
        })
        .collect();
    Ok(AnyTrade::V2(V2Trade {
        route: V2Route::new(pairs, input)?,
        trade_type: trade.trade_type,
        input_amount: trade.input_amount.clone(),
        output_amount: trade.output_amount.clone(),
    }))
}

fn to_v3_trade(trade: &MixedTrade) -> Result<AnyTrade, TradeError> {
    let swaps = trade
        .swaps
        .iter()
        .map(|swap| -> Result<Swap<V3Route>, TradeError> {
            let input = swap.route.path.first().ok_or(TradeError::EmptyRoute)?;
            let pools = swap
                .route
                .pools
                .iter()
                .filter_map(|pool| match pool {
                    AnyPool::V3(pool) => Some(pool.clone()),
                    AnyPool::V2(_) => None,
                })
                .collect();
            Ok(Swap {
                route: V3Route::new(pools, input)?,
                input_amount: swap.input_amount.clone(),
                output_amount: swap.output_amount.clone(),
            })
        })
        .collect::<Result<Vec<_>, TradeError>>()?;
    if swaps.is_empty() {
        return Err(TradeError::NoRoutes);
    }
    Ok(AnyTrade::V3(V3Trade {
        swaps,
        trade_type: trade.trade_type,
        input_amount: trade.input_amount.clone(),
        output_amount: trade.output_amount.clone(),
    }))
}

/// Re-expresses a routed trade for the router version its approvals favour.
pub fn swap_approval_optimized_trade(
    trade: Option<&MixedTrade>,
    executor_allowance: AllowanceState,
) -> Option<AnyTrade> {
    let trade = trade?;
    let only_v2_routes = trade.routes().all(|r| r.protocol() == Protocol::V2);
    let only_v3_routes = trade.routes().all(|r| r.protocol() == Protocol::V3);
    let trade_has_splits = trade.swaps.len() > 1;
    if trade_has_splits {
        error!(routes = trade.swaps.len(), "trade has splits, which are not supported");
    }

    let version = tx_optimized_swap_router(
        only_v2_routes,
        only_v3_routes,
        trade_has_splits,
        swap_approval_states(executor_allowance),
    )?;

    let converted = match version {
        SwapRouterVersion::V2V3 => Ok(AnyTrade::Mixed(trade.clone())),
        SwapRouterVersion::V2 => to_v2_trade(trade),
        SwapRouterVersion::V3 => to_v3_trade(trade),
    };
    match converted {
        Ok(trade) => Some(trade),
        Err(e) => {
            debug!(error = %e, ?version, "could not convert trade for router");
            None
        }
    }
}
