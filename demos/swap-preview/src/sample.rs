use alloy::primitives::{address, U256};
use swap_message::trade::{
    AnyPool, Currency, CurrencyAmount, MixedRoute, MixedTrade, Pool, Swap, Token,
};
use swap_message::TradeType;

pub fn usdc(chain_id: u64) -> Token {
    Token::new(chain_id, address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"), 6, "USDC")
}

pub fn weth(chain_id: u64) -> Token {
    Token::new(chain_id, address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"), 18, "WETH")
}

/// 1000 USDC -> WETH through the 0.05% pool, quoted at 0.3 WETH.
pub fn usdc_weth_trade(chain_id: u64) -> eyre::Result<MixedTrade> {
    let usdc = usdc(chain_id);
    let weth = weth(chain_id);
    let pool = Pool {
        address: address!("88e6a0c2ddd26feeb64f039a2c41296fcb3f5640"),
        token0: usdc.clone(),
        token1: weth.clone(),
        fee: 500,
    };
    let route = MixedRoute::new(vec![AnyPool::V3(pool)], &usdc)?;

    let input = CurrencyAmount::from_raw(Currency::Token(usdc), U256::from(1_000_000_000u64));
    let output = CurrencyAmount::from_raw(
        Currency::Token(weth),
        U256::from(300_000_000_000_000_000u64),
    );
    Ok(MixedTrade {
        swaps: vec![Swap {
            route,
            input_amount: input.clone(),
            output_amount: output.clone(),
        }],
        trade_type: TradeType::ExactInput,
        input_amount: input,
        output_amount: output,
    })
}
