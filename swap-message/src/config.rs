//! Environment-driven configuration

use std::env;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::deadline::DEFAULT_DEADLINE_FROM_NOW;
use crate::error::ConfigError;
use crate::router::{AddressBook, CHAIN_MAINNET};
use crate::trade::Percent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapConfig {
    /// JSON-RPC endpoint, optional for offline previews
    #[serde(default)]
    pub rpc_url: Option<String>,

    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Verifying contract that receives approvals and swap messages
    #[serde(default)]
    pub executor: Option<Address>,

    #[serde(default = "default_deadline_ttl")]
    pub deadline_ttl_secs: u64,

    #[serde(default = "default_slippage_bps")]
    pub slippage_bps: u64,
}

fn default_chain_id() -> u64 {
    CHAIN_MAINNET
}

fn default_deadline_ttl() -> u64 {
    DEFAULT_DEADLINE_FROM_NOW
}

fn default_slippage_bps() -> u64 {
    50
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            chain_id: default_chain_id(),
            executor: None,
            deadline_ttl_secs: default_deadline_ttl(),
            slippage_bps: default_slippage_bps(),
        }
    }
}

impl SwapConfig {
    /// Reads `RPC_URL`, `CHAIN_ID`, `EXECUTOR_ADDRESS`, `DEADLINE_TTL_SECS` and
    /// `SLIPPAGE_BPS`, after loading a `.env` file when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("RPC_URL").filter(|v| !v.trim().is_empty()) {
            config.rpc_url = Some(url);
        }
        if let Some(value) = lookup("CHAIN_ID") {
            config.chain_id = parse_u64("CHAIN_ID", &value)?;
        }
        if let Some(value) = lookup("EXECUTOR_ADDRESS") {
            let executor = value.trim().parse::<Address>().map_err(|e| ConfigError::Invalid {
                field: "EXECUTOR_ADDRESS",
                message: format!("{e}"),
            })?;
            config.executor = Some(executor);
        }
        if let Some(value) = lookup("DEADLINE_TTL_SECS") {
            config.deadline_ttl_secs = parse_u64("DEADLINE_TTL_SECS", &value)?;
        }
        if let Some(value) = lookup("SLIPPAGE_BPS") {
            let bps = parse_u64("SLIPPAGE_BPS", &value)?;
            if bps > 10_000 {
                return Err(ConfigError::Invalid {
                    field: "SLIPPAGE_BPS",
                    message: format!("{bps} exceeds 10000"),
                });
            }
            config.slippage_bps = bps;
        }

        Ok(config)
    }

    pub fn slippage(&self) -> Percent {
        Percent::from_bps(self.slippage_bps)
    }

    pub fn address_book(&self) -> AddressBook {
        let book = AddressBook::default();
        match self.executor {
            Some(executor) => book.with_executor(self.chain_id, executor),
            None => book,
        }
    }
}

fn parse_u64(field: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
        field,
        message: format!("{value:?}: {e}"),
    })
}
