use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;

use crate::error::WalletError;
use crate::trade::CurrencyAmount;

/// On-chain ERC-20 allowance status for a spender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowanceState {
    /// Nothing to check: no token amount or no spender.
    Unknown,
    NotApproved,
    Pending,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRequest {
    pub amount: CurrencyAmount,
    pub spender: Address,
}

/// Polls allowances and submits approval transactions.
#[async_trait]
pub trait AllowanceTracker: Send + Sync {
    fn state(&self, request: &ApprovalRequest) -> AllowanceState;

    async fn approve(&self, request: &ApprovalRequest) -> Result<TxHash, WalletError>;
}
