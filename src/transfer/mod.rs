//! Wallet-to-mirror transfer flow

pub mod amount;
pub mod args;
pub mod confirm;
pub mod report;
pub mod runner;

pub use amount::{resolve_amount, FundingTier, FEE_MARGIN, MIN_BALANCE, STANDARD_MINING};
pub use args::TransferArgs;
pub use confirm::{Confirm, LinePrompt, CONFIRM_PROMPT};
pub use report::Reporter;
pub use runner::{RunOutcome, TransferRunner};
