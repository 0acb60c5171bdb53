use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::trade::{AnyTrade, Percent};

/// Off-chain permit signature status for the trade's input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermitState {
    /// Token does not support permit.
    NotApplicable,
    Loading,
    NotSigned,
    Signed,
}

impl PermitState {
    pub fn is_supported(&self) -> bool {
        !matches!(self, PermitState::NotApplicable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermitType {
    /// EIP-2612 `permit(owner, spender, value, deadline, v, r, s)`.
    Amount,
    /// DAI-style `permit(holder, spender, nonce, expiry, allowed, v, r, s)`.
    Allowed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureData {
    pub v: u8,
    pub r: B256,
    pub s: B256,
    pub deadline: u64,
    pub nonce: U256,
    pub owner: Address,
    pub spender: Address,
    pub chain_id: u64,
    pub token_address: Address,
    pub permit_type: PermitType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitRequest {
    pub trade: AnyTrade,
    pub slippage: Percent,
    pub deadline: Option<u64>,
}

#[async_trait]
pub trait PermitSigner: Send + Sync {
    fn state(&self, request: &PermitRequest) -> PermitState;

    fn signature(&self, request: &PermitRequest) -> Option<SignatureData>;

    async fn sign(&self, request: &PermitRequest) -> Result<SignatureData, WalletError>;
}

/// Signer for wallets or tokens without permit support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPermit;

#[async_trait]
impl PermitSigner for NoPermit {
    fn state(&self, _request: &PermitRequest) -> PermitState {
        PermitState::NotApplicable
    }

    fn signature(&self, _request: &PermitRequest) -> Option<SignatureData> {
        None
    }

    async fn sign(&self, _request: &PermitRequest) -> Result<SignatureData, WalletError> {
        Err(WalletError::Unavailable("permit not supported".into()))
    }
}
