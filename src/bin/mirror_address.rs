//! mirror-address - show the SS58 mirror of an EVM address

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tao_mirror_transfer::{wallet::resolve_evm_address, AccountAddress, Config, Reporter};

/// Display an EVM address and the SS58 mirror address that funds it
#[derive(Parser)]
#[command(name = "mirror-address", version, about, long_about = None)]
struct Cli {
    /// EVM address (defaults to the one controlled by ETH_PRIVATE_KEY)
    evm_address: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("❌ Error: {:#}", e).red());
            println!("\n💡 Make sure you have:");
            println!("   • Passed a 0x EVM address, or");
            println!("   • Set ETH_PRIVATE_KEY to the EVM wallet's private key");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let evm = resolve_evm_address(cli.evm_address.as_deref())?;
    let mirror = AccountAddress::evm_mirror(&evm);

    let mut reporter = Reporter::new(std::io::stdout());
    reporter.title("🌪️ Mirror Address Helper 🌀");
    reporter.plain("\nYour Addresses:");
    reporter.addresses(&evm, &mirror);
    reporter.funding_instructions(config.network);
    reporter.info("\n📋 Next Steps:");
    reporter.plain("   • Send TAO to the SS58 Mirror Address");
    reporter.plain(&format!("   • Run: check-balance {:?}", evm));
    Ok(())
}
