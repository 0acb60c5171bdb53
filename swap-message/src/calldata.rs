use alloy::{
    primitives::{aliases::U24, Address, Bytes, U256},
    sol,
    sol_types::SolCall,
};

use crate::arguments::SwapMessage;
use crate::error::{CalldataError, Error};
use crate::parameters::{RouterVersion, SwapMethod};
use crate::router::{AddressBook, RouterAbi};
use crate::trade::AnyTrade;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    contract UniV2Router {
        function swapExactTokensForTokens(uint256 amountIn, uint256 amountOutMin, address[] calldata path, address to, uint256 deadline) returns (uint256[] memory amounts);
        function swapTokensForExactTokens(uint256 amountOut, uint256 amountInMax, address[] calldata path, address to, uint256 deadline) returns (uint256[] memory amounts);
    }

    #[derive(Debug, PartialEq, Eq)]
    contract UniV3Router {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }
        struct ExactInputParams {
            bytes path;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
        }
        struct ExactOutputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountOut;
            uint256 amountInMaximum;
            uint160 sqrtPriceLimitX96;
        }
        struct ExactOutputParams {
            bytes path;
            address recipient;
            uint256 deadline;
            uint256 amountOut;
            uint256 amountInMaximum;
        }
        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
        function exactInput(ExactInputParams calldata params) external payable returns (uint256 amountOut);
        function exactOutputSingle(ExactOutputSingleParams calldata params) external payable returns (uint256 amountIn);
        function exactOutput(ExactOutputParams calldata params) external payable returns (uint256 amountIn);
    }

    #[derive(Debug, PartialEq, Eq)]
    contract SwapRouter02 {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }
        struct ExactInputParams {
            bytes path;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
        }
        struct ExactOutputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountOut;
            uint256 amountInMaximum;
            uint160 sqrtPriceLimitX96;
        }
        struct ExactOutputParams {
            bytes path;
            address recipient;
            uint256 amountOut;
            uint256 amountInMaximum;
        }
        function swapExactTokensForTokens(uint256 amountIn, uint256 amountOutMin, address[] calldata path, address to) external payable returns (uint256 amountOut);
        function swapTokensForExactTokens(uint256 amountOut, uint256 amountInMax, address[] calldata path, address to) external payable returns (uint256 amountIn);
        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
        function exactInput(ExactInputParams calldata params) external payable returns (uint256 amountOut);
        function exactOutputSingle(ExactOutputSingleParams calldata params) external payable returns (uint256 amountIn);
        function exactOutput(ExactOutputParams calldata params) external payable returns (uint256 amountIn);
        function multicall(uint256 deadline, bytes[] calldata data) external payable returns (bytes[] memory results);
    }
}

const MAX_FEE: u32 = (1 << 24) - 1;

/// Packs `token | fee | token | ...` with `fees[i]` between `tokens[i]` and `tokens[i + 1]`.
/// Exact-output paths are encoded from the output token backwards.
pub fn encode_v3_path(
    tokens: &[Address],
    fees: &[u32],
    reverse: bool,
) -> Result<Bytes, CalldataError> {
    if tokens.len() < 2 {
        return Err(CalldataError::PathTooShort(tokens.len()));
    }
    if fees.len() != tokens.len() - 1 {
        return Err(CalldataError::RouteMismatch {
            method: "v3 path",
            reason: "one fee per hop expected",
        });
    }
    if let Some(fee) = fees.iter().find(|fee| **fee > MAX_FEE) {
        return Err(CalldataError::FeeOutOfRange(*fee));
    }
    let (first, hops): (&Address, Vec<(u32, &Address)>) = if reverse {
        // token[n] | fee[n-1] | token[n-1] | ... | fee[0] | token[0]
        let hops = fees.iter().copied().zip(tokens.iter()).rev().collect();
        (&tokens[tokens.len() - 1], hops)
    } else {
        (&tokens[0], fees.iter().copied().zip(&tokens[1..]).collect())
    };
    let mut path = Vec::with_capacity(20 + hops.len() * 23);
    path.extend_from_slice(first.as_slice());
    for (fee, token) in hops {
        path.extend_from_slice(&U24::from(fee).to_be_bytes::<3>());
        path.extend_from_slice(token.as_slice());
    }
    Ok(Bytes::from(path))
}

/// Per-hop fee tiers for `method`, checked against the message path.
fn hop_fees(method: SwapMethod, path: &[Address], trade: &AnyTrade) -> Result<Vec<u32>, Error> {
    let fees = trade.first_route_fees()?;
    if fees.len() + 1 != path.len() {
        return Err(CalldataError::RouteMismatch {
            method: method.as_str(),
            reason: "path does not follow the first route",
        }
        .into());
    }
    match method.version() {
        RouterVersion::V2 if fees.iter().any(Option::is_some) => Err(CalldataError::RouteMismatch {
            method: method.as_str(),
            reason: "route crosses a concentrated-liquidity pool",
        }
        .into()),
        RouterVersion::V2 => Ok(Vec::new()),
        RouterVersion::V3 => fees
            .into_iter()
            .map(|fee| {
                fee.ok_or(CalldataError::RouteMismatch {
                    method: method.as_str(),
                    reason: "route crosses a constant-product pair",
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into),
    }
}

fn check_router(method: SwapMethod, abi: RouterAbi) -> Result<(), CalldataError> {
    let supported = match method.version() {
        RouterVersion::V2 => matches!(abi, RouterAbi::V2Router02 | RouterAbi::SwapRouter02),
        RouterVersion::V3 => matches!(abi, RouterAbi::SwapRouter | RouterAbi::SwapRouter02),
    };
    if supported {
        return Ok(());
    }
    let router = match abi {
        RouterAbi::V2Router02 => "V2 Router02",
        RouterAbi::SwapRouter => "V3 SwapRouter",
        RouterAbi::SwapRouter02 => "SwapRouter02",
    };
    Err(CalldataError::RouterMismatch {
        method: method.as_str(),
        router,
    })
}

/// Router calldata for a swap message built from `trade`.
///
/// The call interface follows `message.router` as listed in `book`, and fee
/// tiers come from the pools on the trade's first route. Amount out/in serve
/// as the min/max bounds. SwapRouter02 calls carry the deadline through
/// `multicall(deadline, [call])`.
pub fn encode_swap_call(
    message: &SwapMessage,
    trade: &AnyTrade,
    book: &AddressBook,
) -> Result<Bytes, Error> {
    let method = message.trade_type;
    let path = &message.path;
    if path.len() < 2 {
        return Err(CalldataError::PathTooShort(path.len()).into());
    }
    let abi = book
        .router_abi(message.router)
        .ok_or(CalldataError::UnsupportedRouter(message.router))?;
    check_router(method, abi)?;
    let fees = hop_fees(method, path, trade)?;

    let data = match abi {
        RouterAbi::V2Router02 | RouterAbi::SwapRouter => {
            encode_classic(message, &fees, U256::from(message.deadline))?
        }
        RouterAbi::SwapRouter02 => SwapRouter02::multicallCall {
            deadline: U256::from(message.deadline),
            data: vec![encode_router02(message, &fees)?.into()],
        }
        .abi_encode(),
    };
    Ok(data.into())
}

/// V2 Router02 and V3 SwapRouter calls, deadline passed inline.
fn encode_classic(
    message: &SwapMessage,
    fees: &[u32],
    deadline: U256,
) -> Result<Vec<u8>, CalldataError> {
    let path = &message.path;
    let token_in = path[0];
    let token_out = path[path.len() - 1];

    let data = match message.trade_type {
        SwapMethod::V2SwapExactTokensForTokens => UniV2Router::swapExactTokensForTokensCall {
            amountIn: message.amount_in,
            amountOutMin: message.amount_out,
            path: path.clone(),
            to: message.recipient,
            deadline,
        }
        .abi_encode(),
        SwapMethod::V2SwapTokensForExactTokens => UniV2Router::swapTokensForExactTokensCall {
            amountOut: message.amount_out,
            amountInMax: message.amount_in,
            path: path.clone(),
            to: message.recipient,
            deadline,
        }
        .abi_encode(),
        SwapMethod::V3ExactInputSingle => UniV3Router::exactInputSingleCall {
            params: UniV3Router::ExactInputSingleParams {
                tokenIn: token_in,
                tokenOut: token_out,
                fee: single_fee(fees)?,
                recipient: message.recipient,
                deadline,
                amountIn: message.amount_in,
                amountOutMinimum: message.amount_out,
                sqrtPriceLimitX96: message.sqrt_price_limit_x96,
            },
        }
        .abi_encode(),
        SwapMethod::V3ExactOutputSingle => UniV3Router::exactOutputSingleCall {
            params: UniV3Router::ExactOutputSingleParams {
                tokenIn: token_in,
                tokenOut: token_out,
                fee: single_fee(fees)?,
                recipient: message.recipient,
                deadline,
                amountOut: message.amount_out,
                amountInMaximum: message.amount_in,
                sqrtPriceLimitX96: message.sqrt_price_limit_x96,
            },
        }
        .abi_encode(),
        SwapMethod::V3ExactInput => UniV3Router::exactInputCall {
            params: UniV3Router::ExactInputParams {
                path: encode_v3_path(path, fees, false)?,
                recipient: message.recipient,
                deadline,
                amountIn: message.amount_in,
                amountOutMinimum: message.amount_out,
            },
        }
        .abi_encode(),
        SwapMethod::V3ExactOutput => UniV3Router::exactOutputCall {
            params: UniV3Router::ExactOutputParams {
                path: encode_v3_path(path, fees, true)?,
                recipient: message.recipient,
                deadline,
                amountOut: message.amount_out,
                amountInMaximum: message.amount_in,
            },
        }
        .abi_encode(),
    };
    Ok(data)
}

/// SwapRouter02 calls; the caller wraps them in `multicall` for the deadline.
fn encode_router02(message: &SwapMessage, fees: &[u32]) -> Result<Vec<u8>, CalldataError> {
    let path = &message.path;
    let token_in = path[0];
    let token_out = path[path.len() - 1];

    let data = match message.trade_type {
        SwapMethod::V2SwapExactTokensForTokens => SwapRouter02::swapExactTokensForTokensCall {
            amountIn: message.amount_in,
            amountOutMin: message.amount_out,
            path: path.clone(),
            to: message.recipient,
        }
        .abi_encode(),
        SwapMethod::V2SwapTokensForExactTokens => SwapRouter02::swapTokensForExactTokensCall {
            amountOut: message.amount_out,
            amountInMax: message.amount_in,
            path: path.clone(),
            to: message.recipient,
        }
        .abi_encode(),
        SwapMethod::V3ExactInputSingle => SwapRouter02::exactInputSingleCall {
            params: SwapRouter02::ExactInputSingleParams {
                tokenIn: token_in,
                tokenOut: token_out,
                fee: single_fee(fees)?,
                recipient: message.recipient,
                amountIn: message.amount_in,
                amountOutMinimum: message.amount_out,
                sqrtPriceLimitX96: message.sqrt_price_limit_x96,
            },
        }
        .abi_encode(),
        SwapMethod::V3ExactOutputSingle => SwapRouter02::exactOutputSingleCall {
            params: SwapRouter02::ExactOutputSingleParams {
                tokenIn: token_in,
                tokenOut: token_out,
                fee: single_fee(fees)?,
                recipient: message.recipient,
                amountOut: message.amount_out,
                amountInMaximum: message.amount_in,
                sqrtPriceLimitX96: message.sqrt_price_limit_x96,
            },
        }
        .abi_encode(),
        SwapMethod::V3ExactInput => SwapRouter02::exactInputCall {
            params: SwapRouter02::ExactInputParams {
                path: encode_v3_path(path, fees, false)?,
                recipient: message.recipient,
                amountIn: message.amount_in,
                amountOutMinimum: message.amount_out,
            },
        }
        .abi_encode(),
        SwapMethod::V3ExactOutput => SwapRouter02::exactOutputCall {
            params: SwapRouter02::ExactOutputParams {
                path: encode_v3_path(path, fees, true)?,
                recipient: message.recipient,
                amountOut: message.amount_out,
                amountInMaximum: message.amount_in,
            },
        }
        .abi_encode(),
    };
    Ok(data)
}

fn single_fee(fees: &[u32]) -> Result<U24, CalldataError> {
    match fees {
        [fee] if *fee <= MAX_FEE => Ok(U24::from(*fee)),
        [fee] => Err(CalldataError::FeeOutOfRange(*fee)),
        _ => Err(CalldataError::RouteMismatch {
            method: "single hop",
            reason: "exactly one pool expected",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::WalletContext;
    use crate::arguments::swap_message_arguments;
    use crate::router::CHAIN_MAINNET;
    use crate::trade::fixtures::*;
    use crate::trade::{AnyPool, TradeType};

    fn message_for(trade: &AnyTrade) -> SwapMessage {
        let wallet = WalletContext::connected(Address::repeat_byte(0xaa), CHAIN_MAINNET, ());
        swap_message_arguments(
            Some(trade),
            &wallet,
            Some(Address::repeat_byte(0xbb)),
            Some(1_800),
            &AddressBook::default(),
        )
        .unwrap()
        .remove(0)
    }

    fn encode(trade: &AnyTrade) -> Result<Bytes, Error> {
        encode_swap_call(&message_for(trade), trade, &AddressBook::default())
    }

    fn single_v3(trade_type: TradeType) -> AnyTrade {
        AnyTrade::V3(v3_trade(
            vec![v3_pool(&usdc(), &weth(), 500, Address::repeat_byte(1))],
            trade_type,
        ))
    }

    fn two_hop_v3(trade_type: TradeType) -> AnyTrade {
        AnyTrade::V3(v3_trade(
            vec![
                v3_pool(&usdc(), &weth(), 500, Address::repeat_byte(1)),
                v3_pool(&weth(), &dai(), 3000, Address::repeat_byte(2)),
            ],
            trade_type,
        ))
    }

    fn v2(trade_type: TradeType) -> AnyTrade {
        AnyTrade::V2(v2_trade(
            vec![v2_pair(&usdc(), &weth(), Address::repeat_byte(3))],
            trade_type,
        ))
    }

    #[test]
    fn test_v3_path_packing() {
        let tokens = [Address::repeat_byte(1), Address::repeat_byte(2), Address::repeat_byte(3)];
        let forward = encode_v3_path(&tokens, &[500, 3000], false).unwrap();
        assert_eq!(forward.len(), 20 + 23 * 2);
        assert_eq!(&forward[..20], tokens[0].as_slice());
        assert_eq!(&forward[20..23], &[0x00, 0x01, 0xf4]);
        assert_eq!(&forward[23..43], tokens[1].as_slice());
        assert_eq!(&forward[43..46], &[0x00, 0x0b, 0xb8]);

        let reversed = encode_v3_path(&tokens, &[500, 3000], true).unwrap();
        assert_eq!(&reversed[..20], tokens[2].as_slice());
        assert_eq!(&reversed[20..23], &[0x00, 0x0b, 0xb8]);
        assert_eq!(&reversed[43..46], &[0x00, 0x01, 0xf4]);
        assert_eq!(&reversed[46..], tokens[0].as_slice());

        assert_eq!(
            encode_v3_path(&tokens[..1], &[], false),
            Err(CalldataError::PathTooShort(1))
        );
        assert_eq!(
            encode_v3_path(&tokens, &[3000, 1 << 24], false),
            Err(CalldataError::FeeOutOfRange(1 << 24))
        );
        assert!(matches!(
            encode_v3_path(&tokens, &[3000], false),
            Err(CalldataError::RouteMismatch { .. })
        ));
    }

    #[test]
    fn test_selectors_follow_method() {
        let cases = [
            (v2(TradeType::ExactInput), UniV2Router::swapExactTokensForTokensCall::SELECTOR),
            (v2(TradeType::ExactOutput), UniV2Router::swapTokensForExactTokensCall::SELECTOR),
            (single_v3(TradeType::ExactInput), UniV3Router::exactInputSingleCall::SELECTOR),
            (single_v3(TradeType::ExactOutput), UniV3Router::exactOutputSingleCall::SELECTOR),
            (two_hop_v3(TradeType::ExactInput), UniV3Router::exactInputCall::SELECTOR),
            (two_hop_v3(TradeType::ExactOutput), UniV3Router::exactOutputCall::SELECTOR),
        ];
        for (trade, selector) in cases {
            let data = encode(&trade).unwrap();
            assert_eq!(&data[..4], selector.as_slice(), "{}", message_for(&trade).trade_type);
        }
    }

    #[test]
    fn test_single_hop_uses_pool_fee() {
        let data = encode(&single_v3(TradeType::ExactInput)).unwrap();
        let call = UniV3Router::exactInputSingleCall::abi_decode(&data, true).unwrap();
        assert_eq!(call.params.fee, U24::from(500));
        assert_eq!(call.params.deadline, U256::from(1_800));
    }

    #[test]
    fn test_exact_output_path_uses_route_fees() {
        let data = encode(&two_hop_v3(TradeType::ExactOutput)).unwrap();
        let call = UniV3Router::exactOutputCall::abi_decode(&data, true).unwrap();
        let expected =
            encode_v3_path(&[usdc().address, weth().address, dai().address], &[500, 3000], true)
                .unwrap();
        assert_eq!(call.params.path, expected);
        assert_eq!(&call.params.path[..20], dai().address.as_slice());
    }

    #[test]
    fn test_v2_exact_input_decodes() {
        let data = encode(&v2(TradeType::ExactInput)).unwrap();
        let call = UniV2Router::swapExactTokensForTokensCall::abi_decode(&data, true).unwrap();
        assert_eq!(call.amountIn, U256::from(1_000_000));
        assert_eq!(call.amountOutMin, U256::from(500));
        assert_eq!(call.path, vec![usdc().address, weth().address]);
        assert_eq!(call.to, Address::repeat_byte(0xbb));
        assert_eq!(call.deadline, U256::from(1_800));
    }

    #[test]
    fn test_mixed_trade_targets_swap_router02() {
        let pool = AnyPool::V3(v3_pool(&usdc(), &weth(), 500, Address::repeat_byte(1)));
        let trade = AnyTrade::Mixed(mixed_trade(vec![vec![pool]], TradeType::ExactInput));
        let message = message_for(&trade);
        assert_eq!(
            AddressBook::default().router_abi(message.router),
            Some(RouterAbi::SwapRouter02)
        );

        let data = encode_swap_call(&message, &trade, &AddressBook::default()).unwrap();
        assert_eq!(&data[..4], SwapRouter02::multicallCall::SELECTOR.as_slice());
        let multicall = SwapRouter02::multicallCall::abi_decode(&data, true).unwrap();
        assert_eq!(multicall.deadline, U256::from(1_800));
        assert_eq!(multicall.data.len(), 1);

        let inner = &multicall.data[0];
        assert_eq!(&inner[..4], &[0x04, 0xe4, 0x5a, 0xaf]);
        let call = SwapRouter02::exactInputSingleCall::abi_decode(inner, true).unwrap();
        assert_eq!(call.params.fee, U24::from(500));
        assert_eq!(call.params.recipient, Address::repeat_byte(0xbb));
    }

    #[test]
    fn test_mixed_v2_route_on_swap_router02() {
        let pair = AnyPool::V2(v2_pair(&usdc(), &weth(), Address::repeat_byte(3)));
        let trade = AnyTrade::Mixed(mixed_trade(vec![vec![pair]], TradeType::ExactOutput));

        let data = encode(&trade).unwrap();
        let multicall = SwapRouter02::multicallCall::abi_decode(&data, true).unwrap();
        let call =
            SwapRouter02::swapTokensForExactTokensCall::abi_decode(&multicall.data[0], true).unwrap();
        assert_eq!(call.amountOut, U256::from(500));
        assert_eq!(call.amountInMax, U256::from(1_000_000));
    }

    #[test]
    fn test_route_mixing_pool_kinds_is_rejected() {
        let pair = AnyPool::V2(v2_pair(&usdc(), &weth(), Address::repeat_byte(3)));
        let pool = AnyPool::V3(v3_pool(&weth(), &dai(), 500, Address::repeat_byte(4)));
        let trade = AnyTrade::Mixed(mixed_trade(vec![vec![pair, pool]], TradeType::ExactInput));

        let err = encode(&trade).unwrap_err();
        assert!(matches!(
            err,
            Error::Calldata(CalldataError::RouteMismatch { .. })
        ));
    }

    #[test]
    fn test_unlisted_router_is_rejected() {
        let trade = single_v3(TradeType::ExactInput);
        let mut message = message_for(&trade);
        message.router = Address::repeat_byte(0x01);

        let err = encode_swap_call(&message, &trade, &AddressBook::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Calldata(CalldataError::UnsupportedRouter(router)) if router == Address::repeat_byte(0x01)
        ));
    }

    #[test]
    fn test_v2_method_on_v3_router_is_rejected() {
        let book = AddressBook::default();
        let trade = v2(TradeType::ExactInput);
        let mut message = message_for(&trade);
        message.router = book
            .swap_router_address(Some(&single_v3(TradeType::ExactInput)), Some(CHAIN_MAINNET))
            .unwrap();

        let err = encode_swap_call(&message, &trade, &book).unwrap_err();
        assert!(matches!(
            err,
            Error::Calldata(CalldataError::RouterMismatch { .. })
        ));
    }

    #[test]
    fn test_short_path_rejected() {
        let trade = single_v3(TradeType::ExactInput);
        let mut message = message_for(&trade);
        message.path.clear();

        let err = encode_swap_call(&message, &trade, &AddressBook::default()).unwrap_err();
        assert!(matches!(err, Error::Calldata(CalldataError::PathTooShort(0))));
    }
}
