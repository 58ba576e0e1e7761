//! Local wallet loading and address handling

pub mod address;
pub mod keyfile;

pub use address::{
    evm_address_from_private_key, parse_destination, parse_evm_address, resolve_evm_address,
    AccountAddress, EvmAddress,
};
pub use keyfile::{KeyfileData, KeyfileFormat, NaclKdf};

use crate::{
    error::{Result, TransferError},
    types::constants::keyfile::{COLDKEYPUB_FILE, COLDKEY_FILE},
};
use std::path::{Path, PathBuf};
use subxt_signer::sr25519::Keypair;
use tracing::debug;
use zeroize::Zeroizing;

/// An opened wallet: its name, directory and coldkey address.
///
/// Opening never decrypts anything; the signing key is obtained separately
/// through [`WalletLoader::unlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    name: String,
    path: PathBuf,
    coldkey: AccountAddress,
}

impl Wallet {
    /// Create a wallet reference
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, coldkey: AccountAddress) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            coldkey,
        }
    }

    /// Wallet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wallet directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Coldkey address
    pub fn coldkey_address(&self) -> &AccountAddress {
        &self.coldkey
    }
}

/// Resolves wallet names to addresses and signing keys
pub trait WalletLoader {
    /// Open the wallet called `name` and read its coldkey address
    fn open(&self, name: &str) -> Result<Wallet>;

    /// Produce the coldkey signing key of an opened wallet
    fn unlock(&self, wallet: &Wallet) -> Result<Keypair>;
}

/// Where the coldkey password comes from
#[derive(Clone)]
pub enum PasswordSource {
    /// A known password
    Fixed(Zeroizing<String>),
    /// Ask on the terminal
    Prompt,
}

impl std::fmt::Debug for PasswordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordSource::Fixed(_) => write!(f, "Fixed(***)"),
            PasswordSource::Prompt => write!(f, "Prompt"),
        }
    }
}

impl PasswordSource {
    fn password(&self, wallet: &Wallet) -> Result<Zeroizing<String>> {
        match self {
            PasswordSource::Fixed(password) => Ok(password.clone()),
            PasswordSource::Prompt => dialoguer::Password::new()
                .with_prompt(format!("Enter password to unlock coldkey of '{}'", wallet.name()))
                .interact()
                .map(Zeroizing::new)
                .map_err(|e| TransferError::prompt(e.to_string())),
        }
    }
}

/// Loads Bittensor wallets from `<root>/<name>/{coldkey,coldkeypub.txt}`
#[derive(Debug, Clone)]
pub struct KeyfileWalletLoader {
    root: PathBuf,
    password: PasswordSource,
    kdf: NaclKdf,
}

impl KeyfileWalletLoader {
    /// Create a loader for the given wallet root, prompting for passwords
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            password: PasswordSource::Prompt,
            kdf: NaclKdf::bittensor(),
        }
    }

    /// Use a fixed coldkey password instead of prompting
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = PasswordSource::Fixed(Zeroizing::new(password.into()));
        self
    }

    /// Override the key derivation parameters
    pub fn with_kdf(mut self, kdf: NaclKdf) -> Self {
        self.kdf = kdf;
        self
    }

    /// Wallet root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl WalletLoader for KeyfileWalletLoader {
    fn open(&self, name: &str) -> Result<Wallet> {
        let path = self.root.join(name);
        if !path.is_dir() {
            return Err(TransferError::WalletNotFound {
                name: name.to_string(),
                path,
            });
        }

        let pub_file = path.join(COLDKEYPUB_FILE);
        let data = if pub_file.is_file() {
            keyfile::read_public_keyfile(&pub_file)?
        } else {
            debug!("No {} in {}, reading the coldkey", COLDKEYPUB_FILE, path.display());
            keyfile::read_public_keyfile(&path.join(COLDKEY_FILE))?
        };

        let coldkey = data.address()?;
        debug!("Opened wallet '{}' with coldkey {}", name, coldkey);
        Ok(Wallet::new(name, path, coldkey))
    }

    fn unlock(&self, wallet: &Wallet) -> Result<Keypair> {
        let coldkey_file = wallet.path().join(COLDKEY_FILE);
        if !coldkey_file.is_file() {
            return Err(TransferError::wallet(format!(
                "{} does not exist",
                coldkey_file.display()
            )));
        }

        let data =
            keyfile::read_keyfile(&coldkey_file, self.kdf, || self.password.password(wallet))?;
        let keypair = data.keypair()?;

        let derived = AccountAddress::from_bytes(keypair.public_key().0);
        if &derived != wallet.coldkey_address() {
            return Err(TransferError::wallet(format!(
                "coldkey {} does not match the public coldkey {}",
                derived,
                wallet.coldkey_address()
            )));
        }
        Ok(keypair)
    }
}
