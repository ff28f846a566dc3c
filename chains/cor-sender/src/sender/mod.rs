//! # Sender Loop
//!
//! Sends the same native transfer over and over until the cancellation token
//! fires:
//!
//! 1. check the balance covers `amount + gas_price * gas_limit`
//! 2. build the transfer at the locally tracked nonce
//! 3. swap in a fresh gas estimate when the node gives one
//! 4. sign and submit
//! 5. sleep, then repeat
//!
//! The nonce is fetched once at startup and only advances after the node
//! accepted a transaction, so a failed attempt never leaves a gap.
//!
//! Each attempt reports a [`SendOutcome`]; the loop decides what to do from
//! that value alone.

mod stats;

pub use stats::RunStats;

use crate::account::Account;
use crate::error::{SendError, SetupError};
use crate::intent::{required_cost, TransferIntent};
use crate::rpc::ChainRpc;
use crate::utils::units::{format_ether, format_gwei, short_hash, to_wei};
use core_logic::{ConfigError, CoreError, SenderConfig, TASK_RESULT_TARGET};
use ethers::types::{Address, H256, U256};
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// A balance line is printed after every this many successful sends.
pub const BALANCE_REFRESH_EVERY: u64 = 5;

const TICK: Duration = Duration::from_secs(1);
const PROGRESS_EVERY_SECS: u64 = 5;

/// What to send, to whom and how often. Parsed once from [`SenderConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub recipient: Address,
    /// Per-transaction amount in wei.
    pub amount: U256,
    pub delay_seconds: u64,
    /// Fallback when gas estimation fails, and the limit used for the balance check.
    pub gas_limit: u64,
    pub explorer_url: Option<String>,
    pub symbol: String,
}

impl TransferPlan {
    /// Expects a config that already passed [`SenderConfig::validate`].
    pub fn from_config(config: &SenderConfig) -> Result<Self, CoreError> {
        let recipient = config
            .recipient
            .trim()
            .parse::<Address>()
            .map_err(|_| ConfigError::InvalidAddress {
                address: config.recipient.clone(),
            })?;

        Ok(Self {
            recipient,
            amount: to_wei(&config.amount)?,
            delay_seconds: config.delay_seconds,
            gas_limit: config.gas_limit,
            explorer_url: config
                .explorer_url
                .as_ref()
                .map(|url| url.trim().trim_end_matches('/').to_string()),
            symbol: config.symbol.trim().to_string(),
        })
    }

    pub fn log_banner(&self, sender: Address) {
        info!("{}", "=".repeat(60));
        info!("🚀 {} AUTO SENDER", self.symbol);
        info!("{}", "=".repeat(60));
        info!("📤 Sender: {:?}", sender);
        info!("📥 Receiver: {:?}", self.recipient);
        info!("💸 Amount per TX: {} {}", format_ether(self.amount), self.symbol);
        info!("⏱️  Delay: {} seconds", self.delay_seconds);
        info!("⌨️  Press Ctrl+C to stop");
        info!("{}", "=".repeat(60));
    }
}

/// Sequencing and counters, owned and mutated by the loop only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopState {
    pub initial_nonce: u64,
    pub nonce: u64,
    pub sent: u64,
    pub failed: u64,
}

impl LoopState {
    pub fn new(nonce: u64) -> Self {
        Self {
            initial_nonce: nonce,
            nonce,
            sent: 0,
            failed: 0,
        }
    }

    /// The nonce moves only on [`SendOutcome::Sent`].
    pub fn apply(&mut self, outcome: &SendOutcome) {
        match outcome {
            SendOutcome::Sent(_) => {
                self.sent += 1;
                self.nonce += 1;
            }
            SendOutcome::Recoverable(_) | SendOutcome::Fatal(_) => self.failed += 1,
        }
    }
}

/// A transfer the node accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentTransfer {
    pub tx_hash: H256,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent(SentTransfer),
    /// Nothing was submitted, or the node rejected it. Back off and retry.
    Recoverable(SendError),
    /// Retrying cannot help; the loop ends and statistics are reported.
    Fatal(SendError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Stopped,
    Fatal,
}

pub struct Sender<R> {
    rpc: R,
    account: Account,
    plan: TransferPlan,
    chain_id: u64,
    starting_balance: U256,
    state: LoopState,
}

impl<R: ChainRpc> Sender<R> {
    /// Checks connectivity and takes the starting nonce from the node.
    pub async fn connect(
        rpc: R,
        account: Account,
        plan: TransferPlan,
    ) -> Result<Self, SetupError> {
        if !rpc.is_connected().await {
            return Err(SetupError::Unreachable {
                endpoint: rpc.endpoint().to_string(),
            });
        }

        let chain_id = rpc.chain_id().await?;
        info!("✅ Connected! Chain ID: {}", chain_id);

        match rpc.block_number().await {
            Ok(block) => info!("📦 Current Block: {}", block),
            Err(e) => warn!("Could not read block number: {}", e),
        }

        let address = account.address();
        let starting_balance = rpc.balance(address).await?;
        info!(
            "💰 Starting Balance: {} {}",
            format_ether(starting_balance),
            plan.symbol
        );
        info!("{}", "-".repeat(60));

        let nonce = rpc.transaction_count(address).await?;
        info!("🔢 Starting nonce: {}", nonce);

        Ok(Self {
            rpc,
            account,
            plan,
            chain_id,
            starting_balance,
            state: LoopState::new(nonce),
        })
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// One attempt at the current nonce.
    pub async fn send_transaction(&mut self) -> SendOutcome {
        let outcome = self.attempt().await;
        self.state.apply(&outcome);
        outcome
    }

    async fn attempt(&self) -> SendOutcome {
        let address = self.account.address();

        let balance = match self.rpc.balance(address).await {
            Ok(balance) => balance,
            Err(e) => return SendOutcome::Recoverable(e.into()),
        };
        let gas_price = match self.rpc.gas_price().await {
            Ok(price) => price,
            Err(e) => return SendOutcome::Recoverable(e.into()),
        };

        let need = required_cost(self.plan.amount, gas_price, self.plan.gas_limit);
        if balance < need {
            return SendOutcome::Recoverable(SendError::InsufficientFunds {
                need,
                have: balance,
            });
        }

        let mut intent = TransferIntent {
            from: address,
            nonce: self.state.nonce,
            to: self.plan.recipient,
            value: self.plan.amount,
            gas_limit: self.plan.gas_limit,
            gas_price,
            chain_id: self.chain_id,
        };

        let estimate = self.rpc.estimate_gas(&intent).await;
        match estimate {
            Ok(estimate) => intent = intent.with_gas_limit(estimate),
            Err(e) => warn!(
                "⚠️  Gas estimation failed: {}. Using fallback limit {}",
                e, self.plan.gas_limit
            ),
        }

        let raw = match self.account.sign(&intent).await {
            Ok(raw) => raw,
            Err(e) => return SendOutcome::Fatal(e),
        };

        match self.rpc.send_raw_transaction(raw).await {
            Ok(tx_hash) => SendOutcome::Sent(SentTransfer {
                tx_hash,
                nonce: intent.nonce,
                gas_limit: intent.gas_limit,
                gas_price,
            }),
            Err(e) => SendOutcome::Recoverable(e.into()),
        }
    }

    /// Loops until `token` is cancelled or an attempt comes back fatal.
    pub async fn run(&mut self, token: &CancellationToken) -> LoopExit {
        info!("\n▶️  Starting transaction loop...\n");

        loop {
            if token.is_cancelled() {
                return LoopExit::Stopped;
            }

            match self.send_transaction().await {
                SendOutcome::Sent(sent) => {
                    self.report_sent(&sent).await;

                    if self.plan.delay_seconds > 0 {
                        info!("⏳ Next transaction in {} seconds...", self.plan.delay_seconds);
                    }
                    if !wait_cancellable(self.plan.delay_seconds, token).await {
                        return LoopExit::Stopped;
                    }
                }
                SendOutcome::Recoverable(err) => {
                    warn!(target: TASK_RESULT_TARGET, "FAILED TX #{}: {}", self.state.nonce, err);

                    let backoff = self.plan.delay_seconds.saturating_mul(2);
                    info!("⏳ Waiting {} seconds before retry...", backoff);
                    if !wait_cancellable(backoff, token).await {
                        return LoopExit::Stopped;
                    }
                }
                SendOutcome::Fatal(err) => {
                    error!("❌ Unexpected error: {}", err);
                    return LoopExit::Fatal;
                }
            }
        }
    }

    async fn report_sent(&self, sent: &SentTransfer) {
        info!(
            target: TASK_RESULT_TARGET,
            "SUCCESS TX #{} Sent! Hash: {}...",
            sent.nonce,
            short_hash(&sent.tx_hash)
        );
        info!(
            "   Amount: {} {} | Gas: {} Gwei",
            format_ether(self.plan.amount),
            self.plan.symbol,
            format_gwei(sent.gas_price)
        );

        if self.state.sent % BALANCE_REFRESH_EVERY == 0 {
            match self.rpc.balance(self.account.address()).await {
                Ok(balance) => info!(
                    "💰 Balance update: {} {}",
                    format_ether(balance),
                    self.plan.symbol
                ),
                Err(e) => warn!("Balance update failed: {}", e),
            }
        }

        if self.state.sent == 1 {
            if let Some(explorer) = &self.plan.explorer_url {
                info!("🔗 Explorer: {}/tx/{:?}", explorer, sent.tx_hash);
            }
        }
    }

    /// Consumes the sender and collects the final numbers.
    pub async fn finish(self, exit: LoopExit) -> RunStats {
        let final_balance = match self.rpc.balance(self.account.address()).await {
            Ok(balance) => Some(balance),
            Err(e) => {
                warn!("Final balance query failed: {}", e);
                None
            }
        };

        RunStats {
            sent: self.state.sent,
            failed: self.state.failed,
            initial_nonce: self.state.initial_nonce,
            final_nonce: self.state.nonce,
            starting_balance: self.starting_balance,
            final_balance,
            exit,
        }
    }
}

/// Sleeps `seconds` in one-second ticks. Returns `false` as soon as `token`
/// is cancelled, so shutdown never waits more than a tick.
pub async fn wait_cancellable(seconds: u64, token: &CancellationToken) -> bool {
    if seconds == 0 {
        // Still give the signal listener a chance to run
        tokio::task::yield_now().await;
        return !token.is_cancelled();
    }

    for elapsed in 1..=seconds {
        tokio::select! {
            _ = token.cancelled() => return false,
            _ = sleep(TICK) => {}
        }
        if elapsed % PROGRESS_EVERY_SECS == 0 && elapsed < seconds {
            info!("   {}/{} seconds...", elapsed, seconds);
        }
    }

    !token.is_cancelled()
}

/// Connects, loops until stopped and returns the final statistics.
///
/// Only setup failures come back as `Err`; everything after the first
/// iteration ends in a [`RunStats`].
pub async fn run<R: ChainRpc>(
    rpc: R,
    account: Account,
    plan: TransferPlan,
    token: CancellationToken,
) -> Result<RunStats, SetupError> {
    let mut sender = Sender::connect(rpc, account, plan).await?;
    let exit = sender.run(&token).await;
    Ok(sender.finish(exit).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RpcError;
    use core_logic::{SecretKey, DEFAULT_RPC_TIMEOUT_SECONDS, DEFAULT_SYMBOL};

    fn config() -> SenderConfig {
        SenderConfig {
            private_key: SecretKey::new(
                "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            ),
            rpc_url: "http://127.0.0.1:8545".to_string(),
            recipient: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
            amount: "0.0001".to_string(),
            delay_seconds: 5,
            gas_limit: 21_000,
            rpc_timeout_seconds: DEFAULT_RPC_TIMEOUT_SECONDS,
            explorer_url: Some("https://explorer.example.com/".to_string()),
            symbol: DEFAULT_SYMBOL.to_string(),
        }
    }

    #[test]
    fn test_plan_from_config() {
        let plan = TransferPlan::from_config(&config()).unwrap();
        assert_eq!(plan.amount, U256::exp10(14));
        assert_eq!(plan.gas_limit, 21_000);
        assert_eq!(plan.delay_seconds, 5);
        assert_eq!(
            plan.explorer_url.as_deref(),
            Some("https://explorer.example.com")
        );
    }

    #[test]
    fn test_plan_rejects_invalid_config() {
        let mut bad = config();
        bad.recipient = "0x1234".to_string();
        assert!(TransferPlan::from_config(&bad).is_err());
    }

    #[test]
    fn test_plan_only_reads_transfer_fields() {
        // Key checks belong to validation, not to plan building
        let mut config = config();
        config.private_key = SecretKey::new("");
        let plan = TransferPlan::from_config(&config).unwrap();
        assert_eq!(plan.symbol, "COR");
    }

    #[test]
    fn test_state_advances_only_on_sent() {
        let mut state = LoopState::new(10);

        state.apply(&SendOutcome::Recoverable(SendError::Rpc(RpcError::new(
            "eth_sendRawTransaction",
            "nonce too low",
        ))));
        assert_eq!(state.nonce, 10);
        assert_eq!(state.failed, 1);

        state.apply(&SendOutcome::Sent(SentTransfer {
            tx_hash: H256::zero(),
            nonce: 10,
            gas_limit: 21_000,
            gas_price: U256::one(),
        }));
        assert_eq!(state.nonce, 11);
        assert_eq!(state.sent, 1);
        assert_eq!(state.initial_nonce, 10);
    }

    #[test]
    fn test_fatal_does_not_advance() {
        let mut state = LoopState::new(3);
        state.apply(&SendOutcome::Fatal(SendError::Signing("bad key".into())));
        assert_eq!(state.nonce, 3);
        assert_eq!(state.sent, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_runs_full_duration() {
        let token = CancellationToken::new();
        let start = tokio::time::Instant::now();
        assert!(wait_cancellable(3, &token).await);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_stops_within_a_tick() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(2_500)).await;
            canceller.cancel();
        });

        let start = tokio::time::Instant::now();
        assert!(!wait_cancellable(10, &token).await);
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_zero_wait_sees_cancellation() {
        let token = CancellationToken::new();
        assert!(wait_cancellable(0, &token).await);
        token.cancel();
        assert!(!wait_cancellable(0, &token).await);
    }
}
