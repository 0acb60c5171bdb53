use alloy::primitives::Address;

pub mod allowance;
pub mod contract;
pub mod ens;
pub mod permit;

/// Wallet connection as seen by the swap form. Every field stays `None` until
/// the wallet finishes connecting.
#[derive(Debug, Clone)]
pub struct WalletContext<P = ()> {
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
    pub provider: Option<P>,
}

impl<P> Default for WalletContext<P> {
    fn default() -> Self {
        Self {
            account: None,
            chain_id: None,
            provider: None,
        }
    }
}

impl<P> WalletContext<P> {
    pub fn connected(account: Address, chain_id: u64, provider: P) -> Self {
        Self {
            account: Some(account),
            chain_id: Some(chain_id),
            provider: Some(provider),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some() && self.chain_id.is_some() && self.provider.is_some()
    }
}
