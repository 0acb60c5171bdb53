use alloy::primitives::{aliases::U160, Address, U256};
use serde::Serialize;
use tracing::{debug, error};

use crate::adapters::WalletContext;
use crate::error::TradeError;
use crate::memo::Memo;
use crate::parameters::{swap_message_parameters, SwapMethod};
use crate::router::AddressBook;
use crate::trade::AnyTrade;

/// Fee tier reported in the message. Router calldata reads the real tiers from the route's pools.
pub const PLACEHOLDER_FEE: u32 = 3000;

/// Swap request handed to the executor backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapMessage {
    pub router: Address,
    pub amount_in: U256,
    pub amount_out: U256,
    pub trade_type: SwapMethod,
    pub recipient: Address,
    pub path: Vec<Address>,
    pub deadline: u64,
    #[serde(rename = "sqrtPriceLimitX96")]
    pub sqrt_price_limit_x96: U160,
    pub fee: u32,
}

/// Builds the swap messages for `trade`.
///
/// Returns an empty list while any input is missing. Split trades collapse into
/// a single message built from the first route.
pub fn swap_message_arguments<P>(
    trade: Option<&AnyTrade>,
    wallet: &WalletContext<P>,
    recipient: Option<Address>,
    deadline: Option<u64>,
    book: &AddressBook,
) -> Result<Vec<SwapMessage>, TradeError> {
    let router = book.swap_router_address(trade, wallet.chain_id);
    let (Some(trade), Some(recipient), Some(deadline), Some(router)) =
        (trade, recipient, deadline, router)
    else {
        debug!(
            has_trade = trade.is_some(),
            has_recipient = recipient.is_some(),
            has_deadline = deadline.is_some(),
            has_router = router.is_some(),
            "swap message inputs not ready"
        );
        return Ok(vec![]);
    };
    if !wallet.is_connected() {
        debug!("wallet not connected");
        return Ok(vec![]);
    }
    if trade.route_count() > 1 {
        error!(
            routes = trade.route_count(),
            "trade has splits, only the first route is sent"
        );
    }

    let params = swap_message_parameters(trade)?;

    Ok(vec![SwapMessage {
        router,
        amount_in: params.amount_in,
        amount_out: params.amount_out,
        trade_type: params.method,
        recipient,
        path: params.path,
        deadline,
        sqrt_price_limit_x96: U160::ZERO,
        fee: PLACEHOLDER_FEE,
    }])
}

#[derive(Debug, Clone, PartialEq)]
struct ArgumentsKey {
    trade: Option<AnyTrade>,
    account: Option<Address>,
    chain_id: Option<u64>,
    connected: bool,
    recipient: Option<Address>,
    deadline: Option<u64>,
}

/// Memoized [`swap_message_arguments`]: rebuilds only when an input changes.
#[derive(Debug, Default)]
pub struct SwapMessageCache {
    book: AddressBook,
    memo: Memo<ArgumentsKey, Vec<SwapMessage>>,
}

impl SwapMessageCache {
    pub fn new(book: AddressBook) -> Self {
        Self {
            book,
            memo: Memo::default(),
        }
    }

    pub fn messages<P>(
        &mut self,
        trade: Option<&AnyTrade>,
        wallet: &WalletContext<P>,
        recipient: Option<Address>,
        deadline: Option<u64>,
    ) -> Result<&[SwapMessage], TradeError> {
        let key = ArgumentsKey {
            trade: trade.cloned(),
            account: wallet.account,
            chain_id: wallet.chain_id,
            connected: wallet.is_connected(),
            recipient,
            deadline,
        };
        if self.memo.get(&key).is_none() {
            let messages = swap_message_arguments(trade, wallet, recipient, deadline, &self.book)?;
            self.memo.set(key.clone(), messages);
        }
        Ok(self.memo.get(&key).map(Vec::as_slice).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::CHAIN_MAINNET;
    use crate::trade::fixtures::*;
    use crate::trade::{AnyPool, TradeType};

    fn trade() -> AnyTrade {
        AnyTrade::V3(v3_trade(
            vec![v3_pool(&usdc(), &weth(), 500, Address::repeat_byte(1))],
            TradeType::ExactInput,
        ))
    }

    fn wallet() -> WalletContext {
        WalletContext::connected(Address::repeat_byte(0xaa), CHAIN_MAINNET, ())
    }

    #[test]
    fn test_builds_single_message() {
        let book = AddressBook::default();
        let recipient = Address::repeat_byte(0xbb);
        let messages =
            swap_message_arguments(Some(&trade()), &wallet(), Some(recipient), Some(1_800), &book)
                .unwrap();

        assert_eq!(messages.len(), 1);
        let message = &messages[0];
        assert_eq!(message.trade_type, SwapMethod::V3ExactInputSingle);
        assert_eq!(
            Some(message.router),
            book.swap_router_address(Some(&trade()), Some(CHAIN_MAINNET))
        );
        assert_eq!(message.recipient, recipient);
        assert_eq!(message.deadline, 1_800);
        assert_eq!(message.fee, PLACEHOLDER_FEE);
        assert_eq!(message.sqrt_price_limit_x96, U160::ZERO);
    }

    #[test]
    fn test_missing_input_yields_nothing() {
        let book = AddressBook::default();
        let recipient = Some(Address::repeat_byte(0xbb));
        let trade = trade();

        let cases: Vec<(WalletContext, Option<Address>, Option<u64>)> = vec![
            (
                WalletContext {
                    account: None,
                    ..wallet()
                },
                recipient,
                Some(1),
            ),
            (
                WalletContext {
                    chain_id: None,
                    ..wallet()
                },
                recipient,
                Some(1),
            ),
            (
                WalletContext {
                    provider: None,
                    ..wallet()
                },
                recipient,
                Some(1),
            ),
            (wallet(), None, Some(1)),
            (wallet(), recipient, None),
            // no router deployment on this chain
            (
                WalletContext::connected(Address::repeat_byte(0xaa), 999_999, ()),
                recipient,
                Some(1),
            ),
        ];

        for (wallet, recipient, deadline) in cases {
            let messages =
                swap_message_arguments(Some(&trade), &wallet, recipient, deadline, &book).unwrap();
            assert!(messages.is_empty());
        }
        assert!(
            swap_message_arguments(None, &wallet(), recipient, Some(1), &book)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_split_trade_uses_first_route() {
        let book = AddressBook::default();
        let first = AnyPool::V3(v3_pool(&usdc(), &weth(), 500, Address::repeat_byte(1)));
        let second = AnyPool::V3(v3_pool(&usdc(), &dai(), 500, Address::repeat_byte(2)));
        let split = AnyTrade::Mixed(mixed_trade(
            vec![vec![first], vec![second]],
            TradeType::ExactInput,
        ));

        let messages = swap_message_arguments(
            Some(&split),
            &wallet(),
            Some(Address::repeat_byte(0xbb)),
            Some(1),
            &book,
        )
        .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].path, vec![usdc().address, weth().address]);
    }

    #[test]
    fn test_cache_tracks_inputs() {
        let mut cache = SwapMessageCache::new(AddressBook::default());
        let recipient = Some(Address::repeat_byte(0xbb));
        let trade = trade();

        let first = cache
            .messages(Some(&trade), &wallet(), recipient, Some(10))
            .unwrap();
        assert_eq!(first[0].deadline, 10);
        let first_ptr = first.as_ptr();

        // same inputs hand back the stored messages without rebuilding them
        let hit = cache
            .messages(Some(&trade.clone()), &wallet(), recipient, Some(10))
            .unwrap();
        assert_eq!(hit.as_ptr(), first_ptr);

        let second = cache
            .messages(Some(&trade), &wallet(), recipient, Some(20))
            .unwrap();
        assert_eq!(second[0].deadline, 20);
        assert_ne!(second.as_ptr(), first_ptr);

        let disconnected = cache
            .messages(Some(&trade), &WalletContext::<()>::default(), recipient, Some(20))
            .unwrap();
        assert!(disconnected.is_empty());
    }

    #[test]
    fn test_message_json_shape() {
        let messages = swap_message_arguments(
            Some(&trade()),
            &wallet(),
            Some(Address::repeat_byte(0xbb)),
            Some(1_800),
            &AddressBook::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&messages[0]).unwrap();
        assert_eq!(json["tradeType"], "v3_exactInputSingle");
        assert_eq!(json["deadline"], 1_800);
        assert_eq!(json["fee"], 3000);
        assert!(json.get("sqrtPriceLimitX96").is_some());
        assert!(json.get("amountIn").is_some());
    }
}
