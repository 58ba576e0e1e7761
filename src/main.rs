//! tao-transfer - send TAO from a local wallet to an EVM mirror address

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tao_mirror_transfer::{
    config::auto_confirm_enabled, types::constants::env_vars, Config, KeyfileWalletLoader,
    LinePrompt, Reporter, RunOutcome, SubtensorClient, TransferArgs, TransferRunner, WaitPolicy,
};
use tracing_subscriber::EnvFilter;

/// Transfer TAO from a local Bittensor wallet to an EVM wallet's SS58 mirror
#[derive(Parser)]
#[command(name = "tao-transfer", version, about, long_about = None, allow_negative_numbers = true)]
struct Cli {
    /// Wallet holding the coldkey to send from
    wallet_name: Option<String>,

    /// SS58 mirror address, or the 0x EVM address it mirrors
    evm_mirror_address: Option<String>,

    /// Amount in TAO (defaults to the balance minus a fee reserve)
    amount: Option<String>,

    #[arg(hide = true)]
    rest: Vec<String>,

    /// Network to connect to (finney, test, local)
    #[arg(long, env = env_vars::NETWORK, default_value = "finney")]
    network: String,

    /// Endpoint overriding the network default
    #[arg(long, env = env_vars::CHAIN_ENDPOINT)]
    chain_endpoint: Option<String>,

    /// Directory holding the wallets
    #[arg(long, env = env_vars::WALLET_PATH)]
    wallet_path: Option<PathBuf>,

    /// Return as soon as the transfer is submitted
    #[arg(long)]
    no_wait_for_inclusion: bool,

    /// Do not wait for the including block to be finalized
    #[arg(long)]
    no_wait_for_finalization: bool,
}

impl Cli {
    fn positionals(&self) -> Vec<String> {
        [&self.wallet_name, &self.evm_mirror_address, &self.amount]
            .into_iter()
            .flatten()
            .chain(&self.rest)
            .cloned()
            .collect()
    }

    fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            wait_for_inclusion: !self.no_wait_for_inclusion,
            wait_for_finalization: !self.no_wait_for_finalization,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", format!("❌ Error: {:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunOutcome> {
    let args = cli.positionals();
    if TransferArgs::is_usage(&args) {
        let mut reporter = Reporter::new(io::stdout());
        reporter.banner();
        reporter.usage();
        return Ok(RunOutcome::Usage);
    }

    let mut config = Config::new(&cli.network, cli.chain_endpoint.as_deref())
        .context("Failed to build the network configuration")?
        .with_wait(cli.wait_policy())
        .with_auto_confirm(auto_confirm_enabled());
    if let Some(ref path) = cli.wallet_path {
        config = config.with_wallet_path(path);
    }
    tracing::debug!("Using {:?}", config);

    let mut loader = KeyfileWalletLoader::new(&config.wallet_path);
    if let Ok(password) = std::env::var(env_vars::COLDKEY_PASSWORD) {
        loader = loader.with_password(password);
    }
    let client = SubtensorClient::from_config(&config);
    // Stdin is locked per answer; the coldkey password prompt reads it afterwards.
    let prompt = LinePrompt::new(|| io::stdin().lock(), io::stdout());
    let reporter = Reporter::new(io::stdout());

    let mut runner = TransferRunner::new(&config, &loader, &client, prompt, reporter);
    Ok(runner.run(&args).await)
}
