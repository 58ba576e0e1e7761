//! Subtensor chain client

use crate::{
    config::{Config, WaitPolicy},
    error::{Result, TransferError},
    types::{constants::pallets::*, Balance, TransferReceipt, TransferStage},
    wallet::AccountAddress,
};
use async_trait::async_trait;
use subxt::{
    dynamic::{self, At, Value},
    tx::{TxInBlock, TxStatus},
    OnlineClient, PolkadotConfig,
};
use subxt_signer::sr25519::Keypair;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use url::Url;

/// Balance queries and transfer submission against a chain.
///
/// Futures are not required to be `Send`: the binaries drive everything on a
/// current-thread runtime.
#[async_trait(?Send)]
pub trait ChainClient {
    /// Free balance of `account`
    async fn get_balance(&self, account: &AccountAddress) -> Result<Balance>;

    /// Transfer `amount` from the signer to `dest`, waiting as `wait` requests
    async fn transfer(
        &self,
        signer: &Keypair,
        dest: &AccountAddress,
        amount: Balance,
        wait: WaitPolicy,
    ) -> Result<TransferReceipt>;
}

/// [`ChainClient`] backed by a subxt connection to a subtensor node.
///
/// The connection is opened on first use.
pub struct SubtensorClient {
    endpoint: Url,
    api: OnceCell<OnlineClient<PolkadotConfig>>,
}

impl std::fmt::Debug for SubtensorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubtensorClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("connected", &self.api.initialized())
            .finish()
    }
}

impl SubtensorClient {
    /// Create a client for `endpoint` without connecting
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            api: OnceCell::new(),
        }
    }

    /// Create a client for the endpoint of `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint.clone())
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn api(&self) -> Result<&OnlineClient<PolkadotConfig>> {
        self.api
            .get_or_try_init(|| async {
                info!("🔗 Connecting to {}", self.endpoint);
                let api = if self.endpoint.scheme() == "wss" {
                    OnlineClient::<PolkadotConfig>::from_url(self.endpoint.as_str()).await?
                } else {
                    OnlineClient::<PolkadotConfig>::from_insecure_url(self.endpoint.as_str())
                        .await?
                };
                info!("✅ Connected to {}", self.endpoint);
                Ok::<_, TransferError>(api)
            })
            .await
    }

    async fn finish_in_block(
        in_block: TxInBlock<PolkadotConfig, OnlineClient<PolkadotConfig>>,
        stage: TransferStage,
    ) -> Result<TransferReceipt> {
        let extrinsic_hash = format!("{:?}", in_block.extrinsic_hash());
        let block_hash = format!("{:?}", in_block.block_hash());
        in_block.wait_for_success().await.map_err(dispatch_error)?;
        Ok(TransferReceipt::included(stage, extrinsic_hash, block_hash))
    }
}

/// Dispatch failures become [`TransferError::ExtrinsicFailed`], everything else
/// stays a client error
fn dispatch_error(err: subxt::Error) -> TransferError {
    match err {
        subxt::Error::Runtime(dispatch) => TransferError::extrinsic_failed(dispatch.to_string()),
        other => TransferError::Chain(other),
    }
}

#[async_trait(?Send)]
impl ChainClient for SubtensorClient {
    async fn get_balance(&self, account: &AccountAddress) -> Result<Balance> {
        let api = self.api().await?;
        debug!("Querying {}::{} for {}", SYSTEM, ACCOUNT, account);

        let query = dynamic::storage(SYSTEM, ACCOUNT, vec![Value::from_bytes(account.as_bytes())]);
        let info = api
            .storage()
            .at_latest()
            .await?
            .fetch_or_default(&query)
            .await?
            .to_value()
            .map_err(subxt::Error::from)?;

        let free = info
            .at("data")
            .at("free")
            .and_then(|free| free.as_u128())
            .ok_or_else(|| TransferError::decode("account info has no data.free balance"))?;
        Ok(Balance::from_rao(free))
    }

    async fn transfer(
        &self,
        signer: &Keypair,
        dest: &AccountAddress,
        amount: Balance,
        wait: WaitPolicy,
    ) -> Result<TransferReceipt> {
        let api = self.api().await?;
        let call = dynamic::tx(
            BALANCES,
            TRANSFER_KEEP_ALIVE,
            vec![
                Value::unnamed_variant("Id", [Value::from_bytes(dest.as_bytes())]),
                Value::u128(amount.rao()),
            ],
        );

        if !wait.wait_for_inclusion && !wait.wait_for_finalization {
            let hash = api.tx().sign_and_submit_default(&call, signer).await?;
            info!("📤 Submitted transfer of {} to {}", amount, dest);
            return Ok(TransferReceipt::submitted(format!("{:?}", hash)));
        }

        let mut progress = api
            .tx()
            .sign_and_submit_then_watch_default(&call, signer)
            .await?;
        info!("📤 Submitted transfer of {} to {}", amount, dest);

        while let Some(status) = progress.next().await {
            match status? {
                TxStatus::InBestBlock(in_block) => {
                    debug!("Transfer in best block {:?}", in_block.block_hash());
                    if !wait.wait_for_finalization {
                        return Self::finish_in_block(in_block, TransferStage::InBlock).await;
                    }
                }
                TxStatus::InFinalizedBlock(in_block) => {
                    debug!("Transfer finalized in {:?}", in_block.block_hash());
                    return Self::finish_in_block(in_block, TransferStage::Finalized).await;
                }
                TxStatus::Error { message }
                | TxStatus::Invalid { message }
                | TxStatus::Dropped { message } => {
                    return Err(TransferError::rejected(message));
                }
                _ => debug!("Transfer status update"),
            }
        }

        Err(TransferError::rejected(
            "transaction status stream ended before the transfer was included",
        ))
    }
}
