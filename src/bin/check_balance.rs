//! check-balance - show the TAO held by an account or an EVM mirror

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tao_mirror_transfer::{
    wallet::resolve_evm_address,
    AccountAddress, ChainClient, Config, Reporter, SubtensorClient,
};
use tracing_subscriber::EnvFilter;

/// Check the TAO balance of an SS58 address or of an EVM wallet's mirror
#[derive(Parser)]
#[command(name = "check-balance", version, about, long_about = None)]
struct Cli {
    /// SS58 address or 0x EVM address (defaults to the one controlled by ETH_PRIVATE_KEY)
    address: Option<String>,
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
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("❌ Error checking balance: {:#}", e).red());
            println!("\n💡 Make sure you have:");
            println!("   • Passed a valid address or set ETH_PRIVATE_KEY");
            println!("   • Connected to the correct network (SUBTENSOR_NETWORK)");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let mut reporter = Reporter::new(io::stdout());
    reporter.title("🌪️ Checking Your TAO Balance 🌀");

    let account = match cli.address.as_deref().map(str::trim) {
        Some(ss58) if !ss58.starts_with("0x") && !ss58.starts_with("0X") => {
            let account: AccountAddress = ss58.parse()?;
            reporter.plain(&format!("SS58 Address: {}", account));
            account
        }
        arg => {
            let evm = resolve_evm_address(arg)?;
            let mirror = AccountAddress::evm_mirror(&evm);
            reporter.plain(&format!("EVM Address: {:?}", evm));
            reporter.plain(&format!("SS58 Mirror: {}", mirror));
            mirror
        }
    };
    reporter.plain(&format!("Network: {}\n", config.network));

    let client = SubtensorClient::from_config(&config);
    let balance = client
        .get_balance(&account)
        .await
        .with_context(|| format!("Failed to query the balance of {}", account))?;
    reporter.funding_hint(balance, &account);
    Ok(())
}
