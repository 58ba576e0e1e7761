//! User-facing status output

use super::amount::FundingTier;
use crate::{
    config::Network,
    types::Balance,
    wallet::{AccountAddress, EvmAddress},
};
use colored::Colorize;
use std::{fmt::Display, io::Write};

/// Writes colored status lines for a transfer run
#[derive(Debug)]
pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    // Write failures are ignored.
    fn line(&mut self, msg: impl Display) {
        let _ = writeln!(self.out, "{}", msg);
    }

    /// Print a success message
    pub fn success(&mut self, msg: &str) {
        self.line(msg.green());
    }

    /// Print an error message
    pub fn error(&mut self, msg: &str) {
        self.line(msg.red());
    }

    /// Print a warning message
    pub fn warning(&mut self, msg: &str) {
        self.line(msg.yellow());
    }

    /// Print an info message
    pub fn info(&mut self, msg: &str) {
        self.line(msg.cyan());
    }

    /// Print an uncolored message
    pub fn plain(&mut self, msg: &str) {
        self.line(msg);
    }

    /// Title block
    pub fn banner(&mut self) {
        self.title("🌪️ Local TAO Transfer Helper 🌀");
    }

    /// Bold title followed by a rule
    pub fn title(&mut self, title: &str) {
        self.line(title.bold());
        self.line("=".repeat(40));
    }

    /// An EVM address and the account it mirrors to
    pub fn addresses(&mut self, evm: &EvmAddress, mirror: &AccountAddress) {
        self.plain(&format!("🔑 EVM Wallet Address:  {:?}", evm));
        self.plain(&format!("🏠 SS58 Mirror Address: {}", mirror));
    }

    /// How to fund a mirror address
    pub fn funding_instructions(&mut self, network: Network) {
        self.info("\n💡 How to Add TAO:");
        self.plain("1. Copy the SS58 Mirror Address above");
        self.plain("2. Send TAO to that address, for example with:");
        self.plain("   tao-transfer <wallet_name> <ss58_mirror_address> [amount]");
        self.plain("3. Once TAO arrives at the SS58 address, it is available to your EVM wallet");
        self.warning("\n⚠️  IMPORTANT: Make sure you're sending on the correct network!");
        self.plain(&format!("   Current network: {}", network));
    }

    /// Balance of a mirror address with a hint about what it allows
    pub fn funding_hint(&mut self, balance: Balance, mirror: &AccountAddress) {
        self.plain(&format!("💰 TAO Balance: {}", balance));
        match FundingTier::of(balance) {
            FundingTier::StandardMining => {
                self.success("✅ Great! You have TAO available.");
                self.plain("   Ready for standard mining");
            }
            FundingTier::TestMiner => {
                self.success("✅ Great! You have TAO available.");
                self.plain("   Enough for a test miner with a small amount");
            }
            FundingTier::TooLow => {
                self.warning("⚠️  Balance too low - need at least 0.1 TAO for testing");
            }
            FundingTier::Empty => {
                self.error("❌ No TAO found. Please send TAO to your SS58 mirror address:");
                self.plain(&format!("   {}", mirror));
                self.info("\n💡 Use: mirror-address for transfer instructions");
            }
        }
    }

    /// Usage text shown when arguments are missing
    pub fn usage(&mut self) {
        self.plain("\nUsage: tao-transfer <wallet_name> <evm_mirror_address> [amount]");
        self.plain("\nExample:");
        self.plain("  tao-transfer your_wallet 5ABC...xyz123 0.5");
        self.plain("\nThe destination may also be a 0x EVM address, which is sent to its mirror.");
        self.plain("\nGet your EVM mirror address with:");
        self.plain("  mirror-address <evm_address>");
    }

    /// Generic hints after an unexpected failure
    pub fn troubleshooting(&mut self, wallet_name: &str) {
        self.info("\n💡 Troubleshooting:");
        self.plain(&format!("   • Make sure wallet '{}' exists", wallet_name));
        self.plain("   • Verify you have sufficient TAO balance");
        self.plain("   • Check network connectivity");
        self.plain("   • Ensure the EVM mirror address is correct");
    }

    /// What to do once a transfer went through
    pub fn next_steps(&mut self, destination: &str) {
        self.info("\n🎯 Next steps:");
        self.plain("1. Wait 1-2 minutes for confirmation");
        self.plain(&format!("2. Run: check-balance {}", destination));
        self.plain("3. Once the balance shows up, start mining from the EVM wallet");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_messages_are_written_in_order() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.success("done");
        reporter.error("broken");
        reporter.plain("plain");

        let text = output(reporter);
        let done = text.find("done").unwrap();
        let broken = text.find("broken").unwrap();
        let plain = text.find("plain").unwrap();
        assert!(done < broken && broken < plain);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_funding_hint() {
        let mirror = AccountAddress::from_bytes([7u8; 32]);

        let mut reporter = Reporter::new(Vec::new());
        reporter.funding_hint(Balance::from_rao(2_000_000_000), &mirror);
        let text = output(reporter);
        assert!(text.contains("2.0000 TAO"));
        assert!(text.contains("standard mining"));

        let mut reporter = Reporter::new(Vec::new());
        reporter.funding_hint(Balance::ZERO, &mirror);
        let text = output(reporter);
        assert!(text.contains("No TAO found"));
        assert!(text.contains(&mirror.to_ss58()));
    }

    #[test]
    fn test_usage_and_hints() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.usage();
        reporter.troubleshooting("miner");

        let text = output(reporter);
        assert!(text.contains("Usage: tao-transfer <wallet_name> <evm_mirror_address> [amount]"));
        assert!(text.contains("Make sure wallet 'miner' exists"));
    }
}
