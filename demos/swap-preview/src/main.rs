use std::env;

use alloy::{
    primitives::{address, hex, Address},
    providers::Provider,
};
use swap_message::{
    adapters::{allowance::AllowanceState, ens::resolve_recipient, ens::StaticNames, WalletContext},
    calldata::encode_swap_call,
    config::SwapConfig,
    deadline::{transaction_deadline, unix_now},
    helpers::build_provider,
    nonce::ExecutorNonce,
    optimized::swap_approval_optimized_trade,
    SwapMessageCache,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod sample;

static DEFAULT_ACCOUNT: Address = address!("c1eb47de5d549d45a871e32d9d082e7ac5d2e3ed");

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = SwapConfig::from_env()?;

    let env_filter = EnvFilter::from_default_env();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_line_number(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let account = match env::var("ACCOUNT") {
        Ok(value) => value.parse::<Address>()?,
        Err(_) => DEFAULT_ACCOUNT,
    };
    let recipient_input = env::var("RECIPIENT").ok();
    let recipient =
        resolve_recipient(&StaticNames::default(), recipient_input.as_deref(), Some(account)).await;

    let book = config.address_book();
    let routed = sample::usdc_weth_trade(config.chain_id)?;
    let Some(trade) = swap_approval_optimized_trade(Some(&routed), AllowanceState::NotApproved)
    else {
        warn!("no router available for trade");
        return Ok(());
    };

    let deadline = unix_now().map(|now| transaction_deadline(now, config.deadline_ttl_secs));
    let wallet = WalletContext::connected(account, config.chain_id, ());

    let mut cache = SwapMessageCache::new(book.clone());
    let messages = cache.messages(Some(&trade), &wallet, recipient, deadline)?;
    if messages.is_empty() {
        warn!(chain_id = config.chain_id, "swap message not ready");
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(messages)?);
    for message in messages {
        let calldata = encode_swap_call(message, &trade, &book)?;
        info!(
            router = %message.router,
            method = %message.trade_type,
            calldata = %hex::encode_prefixed(&calldata),
            "router calldata"
        );
    }

    if let Some(rpc_url) = &config.rpc_url {
        let provider = build_provider(rpc_url).await?;
        let block_number = provider.get_block_number().await?;
        let nonces = ExecutorNonce::new(provider, book);
        match nonces.nonce(Some(config.chain_id), account, block_number).await? {
            Some(nonce) => info!(%account, block_number, %nonce, "executor nonce"),
            None => warn!(chain_id = config.chain_id, "no executor configured"),
        }
    }

    Ok(())
}
