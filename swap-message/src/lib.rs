pub mod adapters;
pub mod approval;
pub mod arguments;
pub mod calldata;
pub mod config;
pub mod deadline;
pub mod error;
pub mod helpers;
pub mod memo;
pub mod nonce;
pub mod optimized;
pub mod parameters;
pub mod router;
pub mod trade;

pub use approval::{approve_or_permit_state, ApproveOrPermit, ApproveOrPermitState, ResolveOutcome};
pub use arguments::{swap_message_arguments, SwapMessage, SwapMessageCache};
pub use error::{Error, Result};
pub use parameters::{swap_message_parameters, MessageParams, RouterVersion, SwapMethod};
pub use router::AddressBook;
pub use trade::{AnyTrade, TradeType};
