//! Positional argument parsing

use crate::{
    error::{Result, TransferError},
    types::Balance,
    wallet::{parse_destination, AccountAddress},
};

/// Validated positional arguments of a transfer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferArgs {
    /// Name of the source wallet
    pub wallet_name: String,
    /// Destination as typed by the user
    pub destination_input: String,
    /// Resolved destination account
    pub destination: AccountAddress,
    /// Explicit amount, `None` for the automatic amount
    pub amount: Option<Balance>,
}

impl TransferArgs {
    /// Whether `args` are too few to describe a transfer
    pub fn is_usage(args: &[String]) -> bool {
        args.len() < 2
    }

    /// Parse `<wallet_name> <destination> [amount]`.
    ///
    /// Returns `Ok(None)` when fewer than two arguments are given. Arguments
    /// past the third are ignored.
    pub fn parse(args: &[String]) -> Result<Option<Self>> {
        if Self::is_usage(args) {
            return Ok(None);
        }
        let (wallet_name, destination_input) = match args {
            [wallet_name, destination, ..] => (wallet_name, destination),
            _ => return Ok(None),
        };

        let amount = args.get(2).map(|raw| parse_amount(raw)).transpose()?;
        let destination = parse_destination(destination_input)?;

        Ok(Some(Self {
            wallet_name: wallet_name.clone(),
            destination_input: destination_input.clone(),
            destination,
            amount,
        }))
    }
}

/// Parse a strictly positive TAO amount
pub fn parse_amount(raw: &str) -> Result<Balance> {
    let amount: Balance = raw.parse()?;
    if amount.is_zero() {
        return Err(TransferError::invalid_amount(format!(
            "'{}' must be at least 1 rao",
            raw
        )));
    }
    Ok(amount)
}
