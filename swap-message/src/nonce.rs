use alloy::primitives::{Address, U256};
use tokio::sync::Mutex;
use tracing::debug;

use crate::adapters::contract::ContractReader;
use crate::error::Result;
use crate::memo::Memo;
use crate::router::AddressBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NonceKey {
    executor: Address,
    owner: Address,
    block: u64,
}

/// Executor nonce of an owner, read once per block.
pub struct ExecutorNonce<R> {
    reader: R,
    book: AddressBook,
    cache: Mutex<Memo<NonceKey, U256>>,
}

impl<R: ContractReader> ExecutorNonce<R> {
    pub fn new(reader: R, book: AddressBook) -> Self {
        Self {
            reader,
            book,
            cache: Mutex::new(Memo::default()),
        }
    }

    /// `Ok(None)` when the chain has no executor deployment.
    pub async fn nonce(&self, chain_id: Option<u64>, owner: Address, block: u64) -> Result<Option<U256>> {
        let Some(executor) = self.book.executor(chain_id) else {
            debug!(?chain_id, "no executor for chain");
            return Ok(None);
        };
        let key = NonceKey {
            executor,
            owner,
            block,
        };

        let mut cache = self.cache.lock().await;
        if let Some(nonce) = cache.get(&key) {
            return Ok(Some(*nonce));
        }
        let nonce = self.reader.executor_nonce(executor, owner).await?;
        debug!(%executor, %owner, block, %nonce, "executor nonce");
        cache.set(key, nonce);
        Ok(Some(nonce))
    }
}
