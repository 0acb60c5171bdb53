//! Approve-or-permit flow for the swap input token.
//!
//! The displayed state is derived from two independently tracked inputs: the
//! on-chain allowance for the executor and the off-chain permit signature.
//! Nothing is stored between derivations.

use alloy::primitives::TxHash;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::adapters::allowance::{AllowanceState, AllowanceTracker, ApprovalRequest};
use crate::adapters::permit::{PermitRequest, PermitSigner, PermitState, SignatureData};
use crate::error::{Error, TradeError};
use crate::router::AddressBook;
use crate::trade::{AnyTrade, CurrencyAmount, Percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApproveOrPermitState {
    RequiresApproval,
    PendingApproval,
    RequiresSignature,
    PendingSignature,
    Approved,
}

/// Pure projection of allowance and signature status onto the five UI states.
pub fn approve_or_permit_state(
    allowance: AllowanceState,
    signature: PermitState,
) -> ApproveOrPermitState {
    if allowance == AllowanceState::Pending {
        ApproveOrPermitState::PendingApproval
    } else if signature == PermitState::Loading {
        ApproveOrPermitState::PendingSignature
    } else if allowance != AllowanceState::NotApproved || signature == PermitState::Signed {
        ApproveOrPermitState::Approved
    } else if signature.is_supported() {
        ApproveOrPermitState::RequiresSignature
    } else {
        ApproveOrPermitState::RequiresApproval
    }
}

/// Builds the allowance check for a swap: the amount to approve (the override,
/// or the trade's maximum input for token inputs) and the executor as spender.
pub fn swap_approval_request(
    trade: Option<&AnyTrade>,
    slippage: &Percent,
    amount: Option<CurrencyAmount>,
    chain_id: Option<u64>,
    book: &AddressBook,
) -> Result<Option<ApprovalRequest>, TradeError> {
    let amount = match (amount, trade) {
        (Some(amount), _) => Some(amount),
        (None, Some(trade)) if trade.input_amount().currency.is_token() => {
            Some(trade.maximum_amount_in(slippage)?)
        }
        _ => None,
    };
    let spender = book.executor(chain_id);
    Ok(amount
        .zip(spender)
        .map(|(amount, spender)| ApprovalRequest { amount, spender }))
}

/// Result of [`ApproveOrPermit::resolve`] other than an unexpected failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Signed(SignatureData),
    ApprovalSubmitted(TxHash),
    /// The user rejected the wallet prompt.
    Cancelled,
    /// Another resolve call is still in flight.
    InFlight,
    /// No amount or spender to approve yet.
    NotReady,
}

pub struct ApproveOrPermit<A, S> {
    allowance: A,
    permit: S,
    approval: Option<ApprovalRequest>,
    permit_request: Option<PermitRequest>,
    in_flight: Mutex<()>,
}

impl<A, S> ApproveOrPermit<A, S>
where
    A: AllowanceTracker,
    S: PermitSigner,
{
    pub fn new(
        allowance: A,
        permit: S,
        approval: Option<ApprovalRequest>,
        permit_request: Option<PermitRequest>,
    ) -> Self {
        Self {
            allowance,
            permit,
            approval,
            permit_request,
            in_flight: Mutex::new(()),
        }
    }

    pub fn allowance_state(&self) -> AllowanceState {
        self.approval
            .as_ref()
            .map(|request| self.allowance.state(request))
            .unwrap_or(AllowanceState::Unknown)
    }

    pub fn signature_state(&self) -> PermitState {
        self.permit_request
            .as_ref()
            .map(|request| self.permit.state(request))
            .unwrap_or(PermitState::NotApplicable)
    }

    pub fn state(&self) -> ApproveOrPermitState {
        approve_or_permit_state(self.allowance_state(), self.signature_state())
    }

    pub fn signature_data(&self) -> Option<SignatureData> {
        self.permit_request
            .as_ref()
            .and_then(|request| self.permit.signature(request))
    }

    /// Requests a permit signature when the token supports one, otherwise an
    /// approval transaction. A failed signature falls back to approval unless
    /// the user rejected it.
    pub async fn resolve(&self) -> Result<ResolveOutcome, Error> {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!("approve or permit already in flight");
            return Ok(ResolveOutcome::InFlight);
        };

        if let Some(request) = self
            .permit_request
            .as_ref()
            .filter(|request| self.permit.state(request) == PermitState::NotSigned)
        {
            match self.permit.sign(request).await {
                Ok(signature) => {
                    info!(owner = %signature.owner, spender = %signature.spender, "permit signed");
                    return Ok(ResolveOutcome::Signed(signature));
                }
                Err(e) if e.is_user_rejection() => {
                    debug!("permit signature rejected by user");
                    return Ok(ResolveOutcome::Cancelled);
                }
                Err(e) => {
                    warn!(error = %e, "permit signature failed, falling back to approval");
                }
            }
        }

        self.approve().await
    }

    async fn approve(&self) -> Result<ResolveOutcome, Error> {
        let Some(request) = self.approval.as_ref() else {
            debug!("no approval request, nothing to approve");
            return Ok(ResolveOutcome::NotReady);
        };
        match self.allowance.approve(request).await {
            Ok(hash) => {
                info!(%hash, spender = %request.spender, "approval submitted");
                Ok(ResolveOutcome::ApprovalSubmitted(hash))
            }
            Err(e) if e.is_user_rejection() => {
                debug!("approval rejected by user");
                Ok(ResolveOutcome::Cancelled)
            }
            Err(e) => {
                warn!(error = %e, spender = %request.spender, "approval failed");
                Err(e.into())
            }
        }
    }
}
