//! Error types for swap message assembly and approvals

use alloy::primitives::Address;
use thiserror::Error;

/// EIP-1193 code a wallet returns when the user rejects a request.
pub const USER_REJECTED_REQUEST: i64 = 4001;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Trade error: {0}")]
    Trade(#[from] TradeError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Calldata error: {0}")]
    Calldata(#[from] CalldataError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Contract read failed: {0}")]
    ContractRead(String),
}

/// Malformed trade data
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TradeError {
    #[error("Trade has no routes")]
    NoRoutes,

    #[error("Route has no pools")]
    EmptyRoute,

    #[error("Zero denominator in {side} amount")]
    ZeroDenominator { side: &'static str },

    #[error("Amount overflows uint256 after slippage")]
    AmountOverflow,

    #[error("Pool {pool} does not contain token {token}")]
    InvalidPath { pool: Address, token: Address },
}

/// Failures reported by the wallet while signing or sending
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("User rejected the request")]
    UserRejected,

    #[error("Wallet returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Wallet unavailable: {0}")]
    Unavailable(String),
}

impl WalletError {
    /// Maps a raw provider error code onto the wallet error taxonomy.
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_REQUEST {
            Self::UserRejected
        } else {
            Self::Rpc {
                code,
                message: message.into(),
            }
        }
    }

    /// Also true for a raw `Rpc` error carrying code 4001.
    pub fn is_user_rejection(&self) -> bool {
        matches!(
            self,
            Self::UserRejected
                | Self::Rpc {
                    code: USER_REJECTED_REQUEST,
                    ..
                }
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalldataError {
    #[error("Swap path needs at least two tokens, got {0}")]
    PathTooShort(usize),

    #[error("Fee tier {0} does not fit in uint24")]
    FeeOutOfRange(u32),

    #[error("Router {0} has no known call interface")]
    UnsupportedRouter(Address),

    #[error("{method} cannot be sent to a {router} router")]
    RouterMismatch { method: &'static str, router: &'static str },

    #[error("Route hops do not match {method}: {reason}")]
    RouteMismatch { method: &'static str, reason: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_rejection_code() {
        assert!(WalletError::from_code(4001, "User denied").is_user_rejection());
        let raw = WalletError::Rpc {
            code: USER_REJECTED_REQUEST,
            message: "User denied".into(),
        };
        assert!(raw.is_user_rejection());

        let err = WalletError::from_code(-32603, "Internal error");
        assert!(!err.is_user_rejection());
        assert_eq!(
            err,
            WalletError::Rpc {
                code: -32603,
                message: "Internal error".into()
            }
        );
    }

    #[test]
    fn test_error_display() {
        let err: Error = TradeError::ZeroDenominator { side: "input" }.into();
        assert_eq!(
            err.to_string(),
            "Trade error: Zero denominator in input amount"
        );
    }
}
