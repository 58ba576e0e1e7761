//! Balance guard and amount resolution

use crate::{
    error::{Result, TransferError},
    types::{
        constants::thresholds::{FEE_MARGIN_RAO, MIN_BALANCE_RAO, STANDARD_MINING_RAO},
        Balance,
    },
};

/// Minimum balance needed to transfer at all, also the floor of the automatic amount
pub const MIN_BALANCE: Balance = Balance::from_rao(MIN_BALANCE_RAO);

/// Reserve left behind for fees by the automatic amount
pub const FEE_MARGIN: Balance = Balance::from_rao(FEE_MARGIN_RAO);

/// Balance needed for standard mining
pub const STANDARD_MINING: Balance = Balance::from_rao(STANDARD_MINING_RAO);

/// What a mirror balance is good for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingTier {
    /// At least [`STANDARD_MINING`]
    StandardMining,
    /// At least [`MIN_BALANCE`]
    TestMiner,
    /// Some TAO, but below [`MIN_BALANCE`]
    TooLow,
    /// Nothing received yet
    Empty,
}

impl FundingTier {
    /// Classify `balance`
    pub fn of(balance: Balance) -> Self {
        if balance >= STANDARD_MINING {
            FundingTier::StandardMining
        } else if balance >= MIN_BALANCE {
            FundingTier::TestMiner
        } else if !balance.is_zero() {
            FundingTier::TooLow
        } else {
            FundingTier::Empty
        }
    }
}

/// Decide how much to transfer out of `balance`.
///
/// A balance below [`MIN_BALANCE`] is rejected before anything else. An
/// explicit amount must not exceed the balance; without one, everything
/// above [`FEE_MARGIN`] is sent, but never less than [`MIN_BALANCE`].
pub fn resolve_amount(balance: Balance, requested: Option<Balance>) -> Result<Balance> {
    if balance < MIN_BALANCE {
        return Err(TransferError::BalanceBelowMinimum {
            balance,
            minimum: MIN_BALANCE,
        });
    }

    match requested {
        Some(requested) if requested > balance => {
            Err(TransferError::AmountExceedsBalance { requested, balance })
        }
        Some(requested) => Ok(requested),
        None => Ok(balance.saturating_sub(FEE_MARGIN).max(MIN_BALANCE)),
    }
}
