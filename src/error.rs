//! Error types for the transfer tooling

use crate::types::Balance;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for transfer operations
pub type Result<T> = std::result::Result<T, TransferError>;

/// Main error type for wallet, chain and transfer operations
#[derive(Error, Debug)]
pub enum TransferError {
    /// Errors raised by the chain client (connection, RPC, metadata, signing)
    #[error("Chain client error: {0}")]
    Chain(#[from] subxt::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system and terminal I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Amount argument could not be used
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Address validation errors
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Wallet directory does not exist
    #[error("Wallet '{name}' not found at {}", .path.display())]
    WalletNotFound {
        /// Wallet name
        name: String,
        /// Directory that was searched
        path: PathBuf,
    },

    /// Keyfile content or key derivation errors
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Keyfile decryption errors
    #[error("Keyfile decryption failed: {0}")]
    Decryption(String),

    /// Balance is below the minimum needed to transfer at all
    #[error("Insufficient TAO balance: {balance} available, need at least {minimum} to proceed")]
    BalanceBelowMinimum {
        /// Current balance
        balance: Balance,
        /// Required minimum
        minimum: Balance,
    },

    /// Requested amount is larger than the balance
    #[error("Insufficient balance: requested {requested}, you have {balance}")]
    AmountExceedsBalance {
        /// Requested amount
        requested: Balance,
        /// Current balance
        balance: Balance,
    },

    /// Transaction pool rejected or dropped the extrinsic
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// Extrinsic was included but its dispatch failed
    #[error("Extrinsic failed: {0}")]
    ExtrinsicFailed(String),

    /// Chain data did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl TransferError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new invalid amount error
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::InvalidAmount(message.into())
    }

    /// Create a new invalid address error
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::InvalidAddress(message.into())
    }

    /// Create a new wallet error
    pub fn wallet(message: impl Into<String>) -> Self {
        Self::Wallet(message.into())
    }

    /// Create a new decryption error
    pub fn decryption(message: impl Into<String>) -> Self {
        Self::Decryption(message.into())
    }

    /// Create a new rejection error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Create a new extrinsic failure error
    pub fn extrinsic_failed(message: impl Into<String>) -> Self {
        Self::ExtrinsicFailed(message.into())
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a new prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt(message.into())
    }

    /// Whether this error stems from a rejected argument rather than a balance,
    /// wallet or chain problem
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidAmount(_) | Self::InvalidAddress(_))
    }

    /// Whether this error is one of the balance guard rejections
    pub fn is_balance_guard(&self) -> bool {
        matches!(
            self,
            Self::BalanceBelowMinimum { .. } | Self::AmountExceedsBalance { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(TransferError::invalid_amount("x").is_argument_error());
        assert!(TransferError::invalid_address("x").is_argument_error());
        assert!(!TransferError::wallet("x").is_argument_error());

        let guard = TransferError::BalanceBelowMinimum {
            balance: Balance::from_rao(50_000_000),
            minimum: Balance::from_rao(100_000_000),
        };
        assert!(guard.is_balance_guard());
        assert!(!TransferError::extrinsic_failed("x").is_balance_guard());
    }

    #[test]
    fn test_guard_messages_show_tao() {
        let err = TransferError::AmountExceedsBalance {
            requested: Balance::from_rao(6_000_000_000),
            balance: Balance::from_rao(5_000_000_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: requested 6.0000 TAO, you have 5.0000 TAO"
        );
    }
}
