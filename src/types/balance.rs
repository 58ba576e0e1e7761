//! TAO balance amounts

use crate::{
    error::{Result, TransferError},
    types::constants::units::{DISPLAY_DECIMALS, RAO_PER_TAO},
};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::{fmt, str::FromStr};

/// An amount of TAO held as integer rao.
///
/// All arithmetic stays in rao so thresholds and the fee margin are exact;
/// decimals only appear at the edges (argument parsing and display).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Balance(u128);

impl Balance {
    /// Zero balance
    pub const ZERO: Balance = Balance(0);

    /// Create a balance from rao
    pub const fn from_rao(rao: u128) -> Self {
        Self(rao)
    }

    /// Amount in rao
    pub const fn rao(self) -> u128 {
        self.0
    }

    /// Convert a TAO amount to a balance, truncating below one rao
    pub fn from_tao(tao: Decimal) -> Result<Self> {
        if tao.is_sign_negative() && !tao.is_zero() {
            return Err(TransferError::invalid_amount(format!(
                "{} is negative",
                tao
            )));
        }
        let rao = tao
            .checked_mul(Decimal::new(RAO_PER_TAO as i64, 0))
            .and_then(|rao| rao.trunc().to_u128())
            .ok_or_else(|| TransferError::invalid_amount(format!("{} is out of range", tao)))?;
        Ok(Self(rao))
    }

    /// Subtract, stopping at zero
    pub fn saturating_sub(self, other: Balance) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Whether the balance is zero
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Round half up to the display precision.
        let step = RAO_PER_TAO / 10u128.pow(DISPLAY_DECIMALS);
        let scaled = self.0.saturating_add(step / 2) / step;
        let unit = 10u128.pow(DISPLAY_DECIMALS);
        write!(
            f,
            "{}.{:0width$} TAO",
            scaled / unit,
            scaled % unit,
            width = DISPLAY_DECIMALS as usize
        )
    }
}

impl FromStr for Balance {
    type Err = TransferError;

    /// Parse a TAO amount such as `0.5` or `1e-3`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let tao = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| TransferError::invalid_amount(format!("'{}' is not a number", s)))?;
        Self::from_tao(tao)
    }
}
