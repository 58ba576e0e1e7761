//! SS58 account addresses and EVM mirror derivation

use crate::{
    error::{Result, TransferError},
    types::constants::{env_vars::ETH_PRIVATE_KEY, mirror::EVM_MIRROR_PREFIX},
};
use blake2::{digest::consts::U32, Blake2b, Digest};
use ethers::{
    signers::{LocalWallet, Signer},
    types::Address,
};
use std::{fmt, str::FromStr};
use subxt::utils::AccountId32;
use zeroize::Zeroizing;

/// A 20-byte EVM account address
pub type EvmAddress = Address;

type Blake2b256 = Blake2b<U32>;

/// A 32-byte Substrate account id, shown as SS58
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    /// Wrap raw account id bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw account id bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Mirror account of an EVM address: `blake2_256("evm:" ++ h160)`
    pub fn evm_mirror(address: &EvmAddress) -> Self {
        let hash = Blake2b256::new()
            .chain_update(EVM_MIRROR_PREFIX)
            .chain_update(address.as_bytes())
            .finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Decode an SS58 string of any address format, verifying its checksum
    pub fn from_ss58(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(TransferError::invalid_address("empty address"));
        }
        AccountId32::from_str(s)
            .map(|account| Self(account.0))
            .map_err(|e| TransferError::invalid_address(format!("{}: {}", s, e)))
    }

    /// Encode as SS58 with the generic Substrate format (42)
    pub fn to_ss58(&self) -> String {
        AccountId32(self.0).to_string()
    }
}

impl From<AccountId32> for AccountAddress {
    fn from(account: AccountId32) -> Self {
        Self(account.0)
    }
}

impl From<AccountAddress> for AccountId32 {
    fn from(address: AccountAddress) -> Self {
        AccountId32(address.0)
    }
}

impl FromStr for AccountAddress {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_ss58(s)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ss58())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_ss58())
    }
}

impl From<[u8; 32]> for AccountAddress {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Parse a `0x`-prefixed 20-byte EVM address
pub fn parse_evm_address(s: &str) -> Result<EvmAddress> {
    let hex_part = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| TransferError::invalid_address(format!("{}: missing 0x prefix", s)))?;
    let bytes = hex::decode(hex_part)
        .map_err(|e| TransferError::invalid_address(format!("{}: {}", s, e)))?;
    if bytes.len() != 20 {
        return Err(TransferError::invalid_address(format!(
            "{}: expected 20 bytes, got {}",
            s,
            bytes.len()
        )));
    }
    Ok(EvmAddress::from_slice(&bytes))
}

/// EVM address controlled by a hex secp256k1 private key
pub fn evm_address_from_private_key(private_key: &str) -> Result<EvmAddress> {
    let key = private_key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);
    LocalWallet::from_str(key)
        .map(|wallet| wallet.address())
        .map_err(|e| TransferError::invalid_address(format!("invalid EVM private key: {}", e)))
}

/// EVM address given on the command line, else the one controlled by
/// `ETH_PRIVATE_KEY`
pub fn resolve_evm_address(arg: Option<&str>) -> Result<EvmAddress> {
    match arg {
        Some(address) => parse_evm_address(address.trim()),
        None => {
            let key = Zeroizing::new(std::env::var(ETH_PRIVATE_KEY).map_err(|_| {
                TransferError::config(format!(
                    "No EVM address given and {} is not set",
                    ETH_PRIVATE_KEY
                ))
            })?);
            evm_address_from_private_key(&key)
        }
    }
}

/// Resolve a transfer destination.
///
/// SS58 strings are used as-is; EVM addresses are replaced by their mirror.
pub fn parse_destination(s: &str) -> Result<AccountAddress> {
    let s = s.trim();
    if s.starts_with("0x") || s.starts_with("0X") {
        parse_evm_address(s).map(|evm| AccountAddress::evm_mirror(&evm))
    } else {
        AccountAddress::from_ss58(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_SS58: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const ALICE_HEX: &str = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

    fn alice() -> AccountAddress {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hex::decode(ALICE_HEX).unwrap());
        AccountAddress::from_bytes(bytes)
    }

    #[test]
    fn test_ss58_encode_known_account() {
        assert_eq!(alice().to_ss58(), ALICE_SS58);
        assert_eq!(AccountId32::from(alice()).to_string(), ALICE_SS58);
    }

    #[test]
    fn test_ss58_decode_any_format() {
        assert_eq!(AccountAddress::from_ss58(ALICE_SS58).unwrap(), alice());
        assert_eq!(
            AccountAddress::from_ss58("15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5").unwrap(),
            alice()
        );
    }

    #[test]
    fn test_ss58_rejects_bad_checksum() {
        // Last character altered
        let tampered = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQZ";
        assert!(AccountAddress::from_ss58(tampered).is_err());
        assert!(AccountAddress::from_ss58("not-base58!").is_err());
        assert!(AccountAddress::from_ss58("").is_err());
    }

    #[test]
    fn test_evm_mirror() {
        let evm = parse_evm_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
        let mirror = AccountAddress::evm_mirror(&evm);
        assert_eq!(
            hex::encode(mirror.as_bytes()),
            "c4518fa0ed143e016e4a1410193704924b890de8f854b94c7a6037651ec65dd0"
        );
        assert_eq!(
            mirror.to_string(),
            "5GW7UHZ9tLocJUaMXFWkr48QHgVoq5tVR1az62mknFacM3cu"
        );
    }

    #[test]
    fn test_evm_address_from_private_key() {
        // First well-known development account
        let address = evm_address_from_private_key(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap();
        assert_eq!(
            address,
            parse_evm_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap()
        );
        assert!(evm_address_from_private_key("0x1234").is_err());
    }

    #[test]
    fn test_resolve_evm_address_prefers_argument() {
        let mirror = "5GW7UHZ9tLocJUaMXFWkr48QHgVoq5tVR1az62mknFacM3cu";
        let address =
            resolve_evm_address(Some(" 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266 ")).unwrap();
        assert_eq!(AccountAddress::evm_mirror(&address).to_ss58(), mirror);
        assert!(resolve_evm_address(Some(mirror)).is_err());
    }

    #[test]
    fn test_parse_destination() {
        assert_eq!(parse_destination(ALICE_SS58).unwrap(), alice());
        assert_eq!(
            parse_destination("0x0000000000000000000000000000000000000000")
                .unwrap()
                .to_string(),
            "5GU8HU4cLcmjpoXLNxWAHYViwbTQggdqd7ykp99CSWGbsZHG"
        );
        assert!(parse_destination("0x1234").is_err());
        assert!(parse_destination("0xzz9Fd6e51aad88F6F4ce6aB8827279cffFb92266").is_err());
        assert!(parse_destination("5ABC...xyz123").is_err());
    }
}
