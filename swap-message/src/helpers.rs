use std::sync::Arc;

use alloy::{
    providers::{ProviderBuilder, RootProvider},
    transports::http::{reqwest::Url, Client, Http},
};
use tracing::info;

pub type HttpProvider = Arc<RootProvider<Http<Client>>>;

pub async fn build_provider(rpc_url: &str) -> eyre::Result<HttpProvider> {
    let url = rpc_url.parse::<Url>()?;
    let provider = ProviderBuilder::new().on_http(url);

    info!(rpc_url, "connected http provider");

    Ok(Arc::new(provider))
}
