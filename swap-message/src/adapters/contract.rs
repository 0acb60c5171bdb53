use alloy::{
    network::TransactionBuilder,
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol,
    sol_types::SolCall,
};
use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::helpers::HttpProvider;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    contract SwapExecutor {
        function nonces(address owner) external view returns (uint256);
    }
}

/// Read-only calls against the executor contract.
#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn executor_nonce(&self, executor: Address, owner: Address) -> Result<U256>;
}

#[async_trait]
impl ContractReader for HttpProvider {
    async fn executor_nonce(&self, executor: Address, owner: Address) -> Result<U256> {
        let call = SwapExecutor::noncesCall { owner };
        let tx = TransactionRequest::default()
            .with_to(executor)
            .with_input(call.abi_encode());
        let output = self
            .call(&tx)
            .await
            .map_err(|e| Error::ContractRead(format!("nonces({owner}) on {executor}: {e}")))?;
        let decoded = SwapExecutor::noncesCall::abi_decode_returns(&output, true)
            .map_err(|e| Error::ContractRead(format!("decode nonces return: {e}")))?;
        Ok(decoded._0)
    }
}
