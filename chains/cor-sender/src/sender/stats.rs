use super::LoopExit;
use crate::utils::units::format_ether;
use ethers::types::U256;
use tracing::{info, warn};

/// Final numbers of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub sent: u64,
    pub failed: u64,
    pub initial_nonce: u64,
    pub final_nonce: u64,
    pub starting_balance: U256,
    /// `None` when the balance could not be read at shutdown.
    pub final_balance: Option<U256>,
    pub exit: LoopExit,
}

impl RunStats {
    /// Starting minus final balance, floored at zero when deposits
    /// outweighed spending. `None` if the final balance is unknown.
    pub fn total_spent(&self) -> Option<U256> {
        self.final_balance
            .map(|final_balance| self.starting_balance.saturating_sub(final_balance))
    }

    pub fn report(&self, symbol: &str) {
        info!("\n{}", "=".repeat(60));
        info!("📊 FINAL STATISTICS");
        info!("{}", "=".repeat(60));
        info!("✅ Total transactions sent: {}", self.sent);
        info!("❌ Failed attempts: {}", self.failed);
        info!("🔢 Starting nonce: {}", self.initial_nonce);
        info!("🔢 Final nonce: {}", self.final_nonce);

        match (self.final_balance, self.total_spent()) {
            (Some(final_balance), Some(spent)) => {
                info!(
                    "💰 Starting balance: {} {}",
                    format_ether(self.starting_balance),
                    symbol
                );
                info!("💰 Final balance: {} {}", format_ether(final_balance), symbol);
                info!("💸 Total spent: {} {}", format_ether(spent), symbol);
            }
            _ => warn!("⚠️  Could not retrieve final balance"),
        }

        if self.exit == LoopExit::Fatal {
            warn!("Loop ended early after an unrecoverable error");
        }
        info!("\n👋 Program stopped.");
        info!("{}", "=".repeat(60));
    }
}
