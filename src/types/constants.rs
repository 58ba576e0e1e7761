//! Constants used throughout the transfer tooling

/// Default RPC endpoints for each Subtensor network
pub mod endpoints {
    /// Finney (mainnet) public entrypoint
    pub const FINNEY_ENDPOINT: &str = "wss://entrypoint-finney.opentensor.ai:443";

    /// Public testnet entrypoint
    pub const TEST_ENDPOINT: &str = "wss://test.finney.opentensor.ai:443";

    /// Locally running subtensor node
    pub const LOCAL_ENDPOINT: &str = "ws://127.0.0.1:9944";
}

/// Token units
pub mod units {
    /// Number of rao in one TAO
    pub const RAO_PER_TAO: u128 = 1_000_000_000;

    /// Decimal places shown in status output
    pub const DISPLAY_DECIMALS: u32 = 4;
}

/// Balance thresholds applied before a transfer, in rao
pub mod thresholds {
    /// Minimum balance required to attempt a transfer (0.1 TAO).
    /// Also the floor of an automatically resolved amount.
    pub const MIN_BALANCE_RAO: u128 = 100_000_000;

    /// Amount left behind for fees when no amount is given (0.01 TAO)
    pub const FEE_MARGIN_RAO: u128 = 10_000_000;

    /// Balance at which the balance checker suggests standard mining (1 TAO)
    pub const STANDARD_MINING_RAO: u128 = 1_000_000_000;
}

/// EVM mirror account derivation
pub mod mirror {
    /// Prefix hashed with an H160 to derive its mirror account
    pub const EVM_MIRROR_PREFIX: &[u8] = b"evm:";
}

/// Runtime call and storage names
pub mod pallets {
    /// Balances pallet
    pub const BALANCES: &str = "Balances";

    /// Transfer call that refuses to reap the sender
    pub const TRANSFER_KEEP_ALIVE: &str = "transfer_keep_alive";

    /// System pallet
    pub const SYSTEM: &str = "System";

    /// Account info storage map
    pub const ACCOUNT: &str = "Account";
}

/// Wallet directory layout and keyfile formats
pub mod keyfile {
    /// Wallet root relative to the home directory
    pub const DEFAULT_WALLET_DIR: &str = ".bittensor/wallets";

    /// Coldkey keyfile name
    pub const COLDKEY_FILE: &str = "coldkey";

    /// Public coldkey keyfile name
    pub const COLDKEYPUB_FILE: &str = "coldkeypub.txt";

    /// Marker of a NaCl secretbox encrypted keyfile
    pub const NACL_PREFIX: &[u8] = b"$NACL";

    /// Marker of a legacy ansible-vault encrypted keyfile
    pub const ANSIBLE_VAULT_PREFIX: &[u8] = b"$ANSIBLE_VAULT";

    /// Marker of a legacy Fernet encrypted keyfile
    pub const FERNET_PREFIX: &[u8] = b"gAAAAA";

    /// Fixed Argon2i salt used by Bittensor keyfile encryption
    pub const NACL_SALT: [u8; 16] = [
        0x13, 0x71, 0x83, 0xdf, 0xf1, 0x5a, 0x09, 0xbc, 0x9c, 0x90, 0xb5, 0x51, 0x87, 0x39, 0xe9,
        0xb1,
    ];

    /// Argon2i passes (libsodium OPSLIMIT_SENSITIVE)
    pub const NACL_OPS_LIMIT: u32 = 8;

    /// Argon2i memory in KiB (libsodium MEMLIMIT_SENSITIVE, 512 MiB)
    pub const NACL_MEM_LIMIT_KIB: u32 = 524_288;

    /// Secretbox nonce length
    pub const SECRETBOX_NONCE_LEN: usize = 24;
}

/// Environment variables read by the binaries
pub mod env_vars {
    /// Set to `true` to skip the confirmation prompt
    pub const AUTO_CONFIRM: &str = "AUTO_CONFIRM";

    /// Wallet root override
    pub const WALLET_PATH: &str = "BT_WALLET_PATH";

    /// Coldkey password, used instead of the interactive prompt
    pub const COLDKEY_PASSWORD: &str = "BT_COLDKEY_PASSWORD";

    /// Network name (`finney`, `test`, `local`)
    pub const NETWORK: &str = "SUBTENSOR_NETWORK";

    /// Endpoint override
    pub const CHAIN_ENDPOINT: &str = "SUBTENSOR_CHAIN_ENDPOINT";

    /// EVM private key used by the mirror address helper
    pub const ETH_PRIVATE_KEY: &str = "ETH_PRIVATE_KEY";
}
