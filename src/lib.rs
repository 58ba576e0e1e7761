//! # TAO Mirror Transfer
//!
//! Move TAO from a local Bittensor wallet's coldkey to the SS58 mirror of an
//! EVM address, so the EVM identity can mine with it.
//!
//! ## Features
//!
//! - **Wallet Keyfiles**: reads `~/.bittensor/wallets/<name>`, including NaCl-encrypted coldkeys
//! - **Address Mapping**: SS58 encoding and EVM mirror derivation
//! - **Balance Guard**: exact rao arithmetic with a minimum balance and a fee reserve
//! - **Confirmation Gate**: interactive y/N prompt, skippable with `AUTO_CONFIRM=true`
//! - **Chain Client**: `Balances::transfer_keep_alive` over subxt with inclusion/finalization waits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::io;
//! use tao_mirror_transfer::{
//!     Config, KeyfileWalletLoader, LinePrompt, Reporter, SubtensorClient, TransferRunner,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("finney", None)?;
//!     let loader = KeyfileWalletLoader::new(&config.wallet_path);
//!     let client = SubtensorClient::from_config(&config);
//!     let prompt = LinePrompt::new(|| io::stdin().lock(), io::stdout());
//!     let reporter = Reporter::new(io::stdout());
//!
//!     let mut runner = TransferRunner::new(&config, &loader, &client, prompt, reporter);
//!     let args = vec![
//!         "my_wallet".to_string(),
//!         "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
//!     ];
//!     let outcome = runner.run(&args).await;
//!
//!     println!("Success: {}", outcome.is_success());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod chain;
pub mod config;
pub mod error;
pub mod transfer;
pub mod types;
pub mod wallet;

// Re-exports for convenience
pub use chain::{ChainClient, SubtensorClient};
pub use config::{Config, Network, WaitPolicy};
pub use error::{Result, TransferError};
pub use transfer::{Confirm, LinePrompt, Reporter, RunOutcome, TransferArgs, TransferRunner};
pub use types::*;
pub use wallet::{AccountAddress, KeyfileWalletLoader, Wallet, WalletLoader};
