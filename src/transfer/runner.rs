//! The transfer flow

use super::{
    amount::resolve_amount,
    args::TransferArgs,
    confirm::{Confirm, CONFIRM_PROMPT},
    report::Reporter,
};
use crate::{
    chain::ChainClient,
    config::Config,
    error::{Result, TransferError},
    types::TransferReceipt,
    wallet::WalletLoader,
};
use std::io::Write;
use tracing::debug;

/// How a transfer run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Too few arguments, usage was printed
    Usage,
    /// Amount or destination could not be used
    InvalidArguments,
    /// Balance guard refused the transfer
    InsufficientBalance,
    /// User declined the confirmation
    Cancelled,
    /// Transfer went through
    Transferred(TransferReceipt),
    /// Wallet, client or chain failure
    Failed,
}

impl RunOutcome {
    /// Whether the process should exit successfully
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            RunOutcome::Usage | RunOutcome::Cancelled | RunOutcome::Transferred(_)
        )
    }
}

/// Runs one transfer: parse, open wallet, check balance, confirm, submit, report.
///
/// Nothing touches the wallet or the chain until the arguments are valid, and
/// the coldkey is unlocked only after the user confirmed.
pub struct TransferRunner<'a, L, C, P, W> {
    config: &'a Config,
    loader: &'a L,
    client: &'a C,
    prompt: P,
    reporter: Reporter<W>,
}

impl<'a, L, C, P, W> TransferRunner<'a, L, C, P, W>
where
    L: WalletLoader,
    C: ChainClient,
    P: Confirm,
    W: Write,
{
    /// Create a runner
    pub fn new(
        config: &'a Config,
        loader: &'a L,
        client: &'a C,
        prompt: P,
        reporter: Reporter<W>,
    ) -> Self {
        Self {
            config,
            loader,
            client,
            prompt,
            reporter,
        }
    }

    /// Recover the reporter
    pub fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }

    /// Run with the positional arguments (program name excluded)
    pub async fn run(&mut self, args: &[String]) -> RunOutcome {
        let args = match TransferArgs::parse(args) {
            Ok(Some(args)) => args,
            Ok(None) => {
                self.reporter.banner();
                self.reporter.usage();
                return RunOutcome::Usage;
            }
            Err(TransferError::InvalidAmount(reason)) => {
                self.reporter.error(&format!(
                    "❌ Invalid amount: {}. Please provide a positive number of TAO.",
                    reason
                ));
                return RunOutcome::InvalidArguments;
            }
            Err(e) => {
                self.reporter.error(&format!("❌ {}", e));
                return RunOutcome::InvalidArguments;
            }
        };

        self.reporter.banner();
        self.reporter.plain(&format!("\nWallet: {}", args.wallet_name));
        self.reporter.plain(&format!("Target EVM Mirror: {}", args.destination_input));
        if args.destination_input.trim() != args.destination.to_ss58() {
            self.reporter.info(&format!("Mirror address: {}", args.destination));
        }

        match self.execute(&args).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_balance_guard() => {
                self.reporter.error(&format!("❌ {}", e));
                RunOutcome::InsufficientBalance
            }
            Err(TransferError::ExtrinsicFailed(reason)) => {
                self.reporter.error("❌ Transfer failed!");
                self.reporter.plain(&format!("   {}", reason));
                RunOutcome::Failed
            }
            Err(e) => {
                self.reporter.error(&format!("❌ Error: {}", e));
                self.reporter.troubleshooting(&args.wallet_name);
                RunOutcome::Failed
            }
        }
    }

    async fn execute(&mut self, args: &TransferArgs) -> Result<RunOutcome> {
        let wallet = self.loader.open(&args.wallet_name)?;
        self.reporter.plain(&format!("From address: {}", wallet.coldkey_address()));

        let balance = self.client.get_balance(wallet.coldkey_address()).await?;
        self.reporter.plain(&format!("Current balance: {}", balance));

        let amount = resolve_amount(balance, args.amount)?;
        debug!("Resolved amount {} rao (requested {:?})", amount.rao(), args.amount);

        self.reporter.plain(&format!("\n📤 Transferring {}...", amount));
        self.reporter.warning("⚠️  This action will transfer TAO to your EVM wallet for mining");

        if !self.config.auto_confirm {
            self.reporter.plain("");
            if !self.prompt.confirm(CONFIRM_PROMPT)? {
                self.reporter.plain("Transfer cancelled.");
                return Ok(RunOutcome::Cancelled);
            }
        }

        let signer = self.loader.unlock(&wallet)?;
        let receipt = self
            .client
            .transfer(&signer, &args.destination, amount, self.config.wait)
            .await?;

        self.reporter.success("✅ Transfer successful!");
        self.reporter.plain(&format!("Extrinsic: {}", receipt));
        self.reporter.next_steps(&args.destination.to_ss58());
        Ok(RunOutcome::Transferred(receipt))
    }
}
