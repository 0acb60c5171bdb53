use std::collections::HashMap;

use alloy::primitives::Address;
use async_trait::async_trait;

#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve_name(&self, name: &str) -> Option<Address>;
}

/// Fixed name table, for tests and offline previews.
#[derive(Debug, Clone, Default)]
pub struct StaticNames {
    names: HashMap<String, Address>,
}

impl StaticNames {
    pub fn with_name(mut self, name: &str, address: Address) -> Self {
        self.names.insert(name.to_lowercase(), address);
        self
    }
}

#[async_trait]
impl NameResolver for StaticNames {
    async fn resolve_name(&self, name: &str) -> Option<Address> {
        self.names.get(&name.to_lowercase()).copied()
    }
}

/// Resolves the swap recipient.
///
/// No input means the connected account receives the output. A literal
/// address passes through; anything else goes to the resolver.
pub async fn resolve_recipient<R>(
    resolver: &R,
    address_or_name: Option<&str>,
    account: Option<Address>,
) -> Option<Address>
where
    R: NameResolver + ?Sized,
{
    let input = match address_or_name {
        None => return account,
        Some(input) => input.trim(),
    };
    if input.is_empty() {
        return None;
    }
    match input.parse::<Address>() {
        Ok(address) => Some(address),
        Err(_) => resolver.resolve_name(input).await,
    }
}
