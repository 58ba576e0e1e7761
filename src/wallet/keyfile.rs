//! Bittensor keyfile parsing and decryption

use crate::{
    error::{Result, TransferError},
    types::constants::keyfile::*,
    wallet::address::AccountAddress,
};
use argon2::{Algorithm, Argon2, Params, Version};
use crypto_secretbox::{
    aead::{Aead, KeyInit},
    Key, Nonce, XSalsa20Poly1305,
};
use serde::Deserialize;
use std::{fs, path::Path, str::FromStr};
use subxt_signer::{sr25519::Keypair, SecretUri};
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

/// Encoding of a keyfile on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyfileFormat {
    /// Unencrypted JSON
    Plain,
    /// NaCl secretbox with an Argon2i derived key
    Nacl,
    /// Legacy ansible-vault encryption
    AnsibleVault,
    /// Legacy Fernet encryption
    Fernet,
}

impl KeyfileFormat {
    /// Detect the format from the raw file content
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(NACL_PREFIX) {
            KeyfileFormat::Nacl
        } else if data.starts_with(ANSIBLE_VAULT_PREFIX) {
            KeyfileFormat::AnsibleVault
        } else if data.starts_with(FERNET_PREFIX) {
            KeyfileFormat::Fernet
        } else {
            KeyfileFormat::Plain
        }
    }
}

/// Argon2i cost parameters for keyfile key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaclKdf {
    /// Passes
    pub ops_limit: u32,
    /// Memory in KiB
    pub mem_limit_kib: u32,
}

impl NaclKdf {
    /// Parameters Bittensor encrypts coldkeys with
    pub const fn bittensor() -> Self {
        Self {
            ops_limit: NACL_OPS_LIMIT,
            mem_limit_kib: NACL_MEM_LIMIT_KIB,
        }
    }

    fn derive_key(&self, password: &str) -> Result<Zeroizing<[u8; 32]>> {
        let params = Params::new(self.mem_limit_kib, self.ops_limit, 1, Some(32))
            .map_err(|e| TransferError::decryption(format!("invalid KDF parameters: {}", e)))?;
        let argon = Argon2::new(Algorithm::Argon2i, Version::V0x13, params);
        let mut key = Zeroizing::new([0u8; 32]);
        argon
            .hash_password_into(password.as_bytes(), &NACL_SALT, &mut key[..])
            .map_err(|e| TransferError::decryption(format!("key derivation failed: {}", e)))?;
        Ok(key)
    }
}

impl Default for NaclKdf {
    fn default() -> Self {
        Self::bittensor()
    }
}

/// Decrypt a `$NACL` keyfile body: nonce followed by the secretbox ciphertext
pub fn decrypt_nacl(data: &[u8], password: &str, kdf: NaclKdf) -> Result<Zeroizing<Vec<u8>>> {
    let body = data
        .strip_prefix(NACL_PREFIX)
        .ok_or_else(|| TransferError::decryption("missing $NACL marker"))?;
    if body.len() <= SECRETBOX_NONCE_LEN {
        return Err(TransferError::decryption("keyfile is truncated"));
    }
    let (nonce, ciphertext) = body.split_at(SECRETBOX_NONCE_LEN);

    let key = kdf.derive_key(password)?;
    let cipher = XSalsa20Poly1305::new(Key::from_slice(&key[..]));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| TransferError::decryption("wrong password or corrupted keyfile"))?;
    Ok(Zeroizing::new(plaintext))
}

/// JSON content of a keyfile. Public keyfiles leave the secret fields empty.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct KeyfileData {
    /// Account id (0x hex)
    #[serde(default)]
    pub account_id: Option<String>,
    /// Public key (0x hex)
    #[serde(default)]
    pub public_key: Option<String>,
    /// SS58 address
    #[serde(default)]
    pub ss58_address: Option<String>,
    /// Mnemonic
    #[serde(default)]
    pub secret_phrase: Option<String>,
    /// Mini secret seed (0x hex)
    #[serde(default)]
    pub secret_seed: Option<String>,
    /// Expanded private key (0x hex)
    #[serde(default)]
    pub private_key: Option<String>,
}

impl Drop for KeyfileData {
    fn drop(&mut self) {
        self.secret_phrase.zeroize();
        self.secret_seed.zeroize();
        self.private_key.zeroize();
    }
}

impl std::fmt::Debug for KeyfileData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyfileData")
            .field("ss58_address", &self.ss58_address)
            .field("public_key", &self.public_key)
            .field("has_secret", &self.has_secret())
            .finish()
    }
}

impl KeyfileData {
    /// Parse keyfile JSON
    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Whether the keyfile carries secret material
    pub fn has_secret(&self) -> bool {
        self.secret_phrase.is_some() || self.secret_seed.is_some()
    }

    /// Address recorded in the keyfile, from `ss58Address` or the public key
    pub fn address(&self) -> Result<AccountAddress> {
        if let Some(ref ss58) = self.ss58_address {
            return AccountAddress::from_ss58(ss58);
        }
        let hex_key = self
            .public_key
            .as_deref()
            .or(self.account_id.as_deref())
            .ok_or_else(|| TransferError::wallet("keyfile has no address or public key"))?;
        let bytes = hex::decode(hex_key.trim_start_matches("0x"))
            .map_err(|e| TransferError::wallet(format!("invalid public key: {}", e)))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TransferError::wallet("public key must be 32 bytes"))?;
        Ok(AccountAddress::from_bytes(bytes))
    }

    /// Rebuild the sr25519 keypair from the mnemonic or seed
    pub fn keypair(&self) -> Result<Keypair> {
        let secret = self
            .secret_phrase
            .as_deref()
            .or(self.secret_seed.as_deref())
            .ok_or_else(|| {
                if self.private_key.is_some() {
                    TransferError::wallet(
                        "keyfile only holds an expanded private key; a phrase or seed is required",
                    )
                } else {
                    TransferError::wallet("keyfile has no secret key")
                }
            })?;

        let uri = SecretUri::from_str(secret)
            .map_err(|e| TransferError::wallet(format!("invalid secret: {}", e)))?;
        let keypair = Keypair::from_uri(&uri)
            .map_err(|e| TransferError::wallet(format!("key derivation failed: {}", e)))?;

        if self.ss58_address.is_some() || self.public_key.is_some() {
            let recorded = self.address()?;
            let derived = AccountAddress::from_bytes(keypair.public_key().0);
            if recorded != derived {
                return Err(TransferError::wallet(format!(
                    "keyfile is inconsistent: secret derives {} but the file records {}",
                    derived, recorded
                )));
            }
        }
        Ok(keypair)
    }
}

/// Read a keyfile, decrypting it with `password` when it is encrypted.
///
/// `password` is only called for encrypted keyfiles.
pub fn read_keyfile<F>(path: &Path, kdf: NaclKdf, password: F) -> Result<KeyfileData>
where
    F: FnOnce() -> Result<Zeroizing<String>>,
{
    debug!("Reading keyfile {}", path.display());
    let data = Zeroizing::new(fs::read(path)?);

    match KeyfileFormat::detect(&data) {
        KeyfileFormat::Plain => KeyfileData::from_json(&data),
        KeyfileFormat::Nacl => {
            let password = password()?;
            let plaintext = decrypt_nacl(&data, &password, kdf)?;
            KeyfileData::from_json(&plaintext)
        }
        format @ (KeyfileFormat::AnsibleVault | KeyfileFormat::Fernet) => {
            warn!("Unsupported legacy keyfile format {:?} at {}", format, path.display());
            Err(TransferError::wallet(format!(
                "{} uses a legacy encryption format; re-encrypt it with btcli first",
                path.display()
            )))
        }
    }
}

/// Read a keyfile that must not need a password
pub fn read_public_keyfile(path: &Path) -> Result<KeyfileData> {
    read_keyfile(path, NaclKdf::bittensor(), || {
        Err(TransferError::wallet(format!(
            "{} is encrypted and has no public counterpart",
            path.display()
        )))
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crypto_secretbox::aead::AeadCore;

    pub(crate) const DEV_PHRASE: &str =
        "bottom drive obey lake curtain smoke basket hold race lonely fit walk";

    /// Cheap parameters so tests do not allocate 512 MiB
    pub(crate) const TEST_KDF: NaclKdf = NaclKdf {
        ops_limit: 1,
        mem_limit_kib: 64,
    };

    pub(crate) fn encrypt_nacl(plaintext: &[u8], password: &str, kdf: NaclKdf) -> Vec<u8> {
        let key = kdf.derive_key(password).unwrap();
        let cipher = XSalsa20Poly1305::new(Key::from_slice(&key[..]));
        let nonce = XSalsa20Poly1305::generate_nonce(&mut crypto_secretbox::aead::OsRng);
        let ciphertext = cipher.encrypt(&nonce, plaintext).unwrap();

        let mut data = NACL_PREFIX.to_vec();
        data.extend_from_slice(&nonce);
        data.extend_from_slice(&ciphertext);
        data
    }

    pub(crate) fn dev_keypair() -> Keypair {
        Keypair::from_uri(&SecretUri::from_str(DEV_PHRASE).unwrap()).unwrap()
    }

    pub(crate) fn dev_keyfile_json() -> String {
        let address = AccountAddress::from_bytes(dev_keypair().public_key().0);
        serde_json::json!({
            "accountId": format!("0x{}", hex::encode(address.as_bytes())),
            "publicKey": format!("0x{}", hex::encode(address.as_bytes())),
            "secretPhrase": DEV_PHRASE,
            "secretSeed": null,
            "privateKey": null,
            "ss58Address": address.to_ss58(),
        })
        .to_string()
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(KeyfileFormat::detect(b"{\"ss58Address\": null}"), KeyfileFormat::Plain);
        assert_eq!(KeyfileFormat::detect(b"$NACL...."), KeyfileFormat::Nacl);
        assert_eq!(KeyfileFormat::detect(b"$ANSIBLE_VAULT;1.1"), KeyfileFormat::AnsibleVault);
        assert_eq!(KeyfileFormat::detect(b"gAAAAABk"), KeyfileFormat::Fernet);
    }

    #[test]
    fn test_bittensor_kdf_parameters() {
        let kdf = NaclKdf::default();
        assert_eq!(kdf.ops_limit, 8);
        assert_eq!(kdf.mem_limit_kib, 512 * 1024);
    }

    #[test]
    fn test_nacl_round_trip() {
        let encrypted = encrypt_nacl(b"{\"secretPhrase\":\"x\"}", "hunter2", TEST_KDF);
        let decrypted = decrypt_nacl(&encrypted, "hunter2", TEST_KDF).unwrap();
        assert_eq!(decrypted.as_slice(), b"{\"secretPhrase\":\"x\"}");
    }

    #[test]
    fn test_nacl_wrong_password() {
        let encrypted = encrypt_nacl(b"secret", "hunter2", TEST_KDF);
        let err = decrypt_nacl(&encrypted, "hunter3", TEST_KDF).unwrap_err();
        assert!(matches!(err, TransferError::Decryption(_)));
    }

    #[test]
    fn test_nacl_truncated() {
        assert!(decrypt_nacl(b"$NACLshort", "pw", TEST_KDF).is_err());
        assert!(decrypt_nacl(b"no marker", "pw", TEST_KDF).is_err());
    }

    #[test]
    fn test_keypair_from_phrase() {
        let data = KeyfileData::from_json(dev_keyfile_json().as_bytes()).unwrap();
        assert!(data.has_secret());
        let keypair = data.keypair().unwrap();
        assert_eq!(keypair.public_key().0, dev_keypair().public_key().0);
    }

    #[test]
    fn test_keypair_from_seed() {
        let seed = format!("0x{}", "01".repeat(32));
        let json = serde_json::json!({ "secretSeed": seed }).to_string();
        let data = KeyfileData::from_json(json.as_bytes()).unwrap();
        let expected = Keypair::from_uri(&SecretUri::from_str(&seed).unwrap()).unwrap();
        assert_eq!(data.keypair().unwrap().public_key().0, expected.public_key().0);
    }

    #[test]
    fn test_keypair_rejects_mismatched_address() {
        let json = serde_json::json!({
            "secretPhrase": DEV_PHRASE,
            "ss58Address": "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY",
        })
        .to_string();
        let data = KeyfileData::from_json(json.as_bytes()).unwrap();
        let err = data.keypair().unwrap_err();
        assert!(err.to_string().contains("inconsistent"));
    }

    #[test]
    fn test_public_keyfile_address() {
        let json = serde_json::json!({
            "publicKey": "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d",
            "secretPhrase": null,
        })
        .to_string();
        let data = KeyfileData::from_json(json.as_bytes()).unwrap();
        assert!(!data.has_secret());
        assert_eq!(
            data.address().unwrap().to_string(),
            "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"
        );
        assert!(data.keypair().is_err());
    }

    #[test]
    fn test_read_keyfile_only_asks_password_when_encrypted() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain");
        fs::write(&plain, dev_keyfile_json()).unwrap();
        let data = read_keyfile(&plain, TEST_KDF, || panic!("password requested")).unwrap();
        assert!(data.has_secret());

        let encrypted = dir.path().join("encrypted");
        fs::write(&encrypted, encrypt_nacl(dev_keyfile_json().as_bytes(), "pw", TEST_KDF)).unwrap();
        let data = read_keyfile(&encrypted, TEST_KDF, || Ok(Zeroizing::new("pw".to_string())))
            .unwrap();
        assert_eq!(data.keypair().unwrap().public_key().0, dev_keypair().public_key().0);
    }

    #[test]
    fn test_read_legacy_keyfile_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coldkey");
        fs::write(&path, b"$ANSIBLE_VAULT;1.1;AES256\n3132").unwrap();
        let err = read_keyfile(&path, TEST_KDF, || Ok(Zeroizing::new(String::new()))).unwrap_err();
        assert!(err.to_string().contains("legacy"));
    }
}
