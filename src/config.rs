//! Configuration for the transfer tooling

use crate::{
    error::{Result, TransferError},
    types::constants::{endpoints::*, env_vars, keyfile::DEFAULT_WALLET_DIR},
};
use std::{env, path::PathBuf, str::FromStr};
use url::Url;

/// Subtensor network to connect to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Network {
    /// Finney mainnet
    #[default]
    Finney,
    /// Public testnet
    Test,
    /// Local development node
    Local,
}

impl FromStr for Network {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "finney" | "mainnet" => Ok(Network::Finney),
            "test" | "testnet" => Ok(Network::Test),
            "local" => Ok(Network::Local),
            _ => Err(TransferError::config(
                "Invalid network. Use 'finney', 'test' or 'local'",
            )),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Finney => write!(f, "finney"),
            Network::Test => write!(f, "test"),
            Network::Local => write!(f, "local"),
        }
    }
}

impl Network {
    /// Default endpoint of this network
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Network::Finney => FINNEY_ENDPOINT,
            Network::Test => TEST_ENDPOINT,
            Network::Local => LOCAL_ENDPOINT,
        }
    }
}

/// Which confirmation stages to wait for after submitting a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Wait until the extrinsic is in a block
    pub wait_for_inclusion: bool,
    /// Wait until that block is finalized
    pub wait_for_finalization: bool,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            wait_for_inclusion: true,
            wait_for_finalization: true,
        }
    }
}

/// Configuration for a transfer run
#[derive(Debug, Clone)]
pub struct Config {
    /// Network
    pub network: Network,

    /// RPC endpoint (ws or wss)
    pub endpoint: Url,

    /// Directory holding one subdirectory per wallet
    pub wallet_path: PathBuf,

    /// Confirmation stages to wait for
    pub wait: WaitPolicy,

    /// Skip the interactive confirmation
    pub auto_confirm: bool,
}

impl Config {
    /// Create a new configuration
    ///
    /// # Arguments
    ///
    /// * `network` - Network name ("finney", "test" or "local")
    /// * `endpoint` - Endpoint overriding the network default
    pub fn new(network: &str, endpoint: Option<&str>) -> Result<Self> {
        let network = Network::from_str(network)?;
        let endpoint = endpoint.unwrap_or_else(|| network.default_endpoint());
        let endpoint = Url::parse(endpoint)
            .map_err(|e| TransferError::config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        match endpoint.scheme() {
            "ws" | "wss" => {}
            other => {
                return Err(TransferError::config(format!(
                    "Unsupported endpoint scheme '{}'. Use ws:// or wss://",
                    other
                )))
            }
        }

        Ok(Self {
            network,
            endpoint,
            wallet_path: Self::default_wallet_path(),
            wait: WaitPolicy::default(),
            auto_confirm: false,
        })
    }

    /// Build a configuration from `SUBTENSOR_NETWORK`, `SUBTENSOR_CHAIN_ENDPOINT`,
    /// `BT_WALLET_PATH` and `AUTO_CONFIRM`
    pub fn from_env() -> Result<Self> {
        let network =
            env::var(env_vars::NETWORK).unwrap_or_else(|_| Network::default().to_string());
        let endpoint = env::var(env_vars::CHAIN_ENDPOINT).ok();

        let mut config = Self::new(&network, endpoint.as_deref())?
            .with_auto_confirm(auto_confirm_enabled());
        if let Ok(path) = env::var(env_vars::WALLET_PATH) {
            config = config.with_wallet_path(path);
        }
        Ok(config)
    }

    /// Set the wallet root directory
    pub fn with_wallet_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.wallet_path = path.into();
        self
    }

    /// Set the wait policy
    pub fn with_wait(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    /// Set whether the confirmation prompt is skipped
    pub fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }

    /// `~/.bittensor/wallets`, relative to the working directory when no home
    /// directory is known
    pub fn default_wallet_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_WALLET_DIR)
    }
}

/// Whether `AUTO_CONFIRM` is set to exactly `true`
pub fn auto_confirm_enabled() -> bool {
    is_auto_confirm_value(env::var(env_vars::AUTO_CONFIRM).ok().as_deref())
}

fn is_auto_confirm_value(value: Option<&str>) -> bool {
    value == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parsing() {
        assert_eq!("finney".parse::<Network>().unwrap(), Network::Finney);
        assert_eq!("Mainnet".parse::<Network>().unwrap(), Network::Finney);
        assert_eq!("TEST".parse::<Network>().unwrap(), Network::Test);
        assert_eq!("local".parse::<Network>().unwrap(), Network::Local);
        assert!("kusama".parse::<Network>().is_err());
    }

    #[test]
    fn test_config_uses_network_endpoint() {
        let config = Config::new("finney", None).unwrap();
        assert_eq!(config.network, Network::Finney);
        assert_eq!(config.endpoint.scheme(), "wss");
        assert_eq!(config.endpoint.host_str(), Some("entrypoint-finney.opentensor.ai"));
        assert_eq!(config.wait, WaitPolicy::default());
        assert!(!config.auto_confirm);
    }

    #[test]
    fn test_config_endpoint_override() {
        let config = Config::new("local", Some("ws://10.0.0.5:9944")).unwrap();
        assert_eq!(config.endpoint.host_str(), Some("10.0.0.5"));
        assert_eq!(config.endpoint.port(), Some(9944));
    }

    #[test]
    fn test_config_rejects_http_endpoint() {
        assert!(Config::new("finney", Some("https://example.com")).is_err());
        assert!(Config::new("finney", Some("not a url")).is_err());
    }

    #[test]
    fn test_builders() {
        let wait = WaitPolicy {
            wait_for_inclusion: true,
            wait_for_finalization: false,
        };
        let config = Config::new("test", None)
            .unwrap()
            .with_wallet_path("/tmp/wallets")
            .with_wait(wait)
            .with_auto_confirm(true);
        assert_eq!(config.wallet_path, PathBuf::from("/tmp/wallets"));
        assert_eq!(config.wait, wait);
        assert!(config.auto_confirm);
    }

    #[test]
    fn test_auto_confirm_requires_exact_true() {
        assert!(is_auto_confirm_value(Some("true")));
        assert!(!is_auto_confirm_value(Some("TRUE")));
        assert!(!is_auto_confirm_value(Some("1")));
        assert!(!is_auto_confirm_value(None));
    }
}
