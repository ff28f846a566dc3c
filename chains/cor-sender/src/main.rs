use anyhow::{Context, Result};
use clap::Parser;
use core_logic::{setup_logger, WorkerRunner};
use cor_sender::config::{Overrides, SenderSettings};
use cor_sender::{run, Account, EthersRpc, SetupError, TransferPlan};
use dotenv::dotenv;
use std::env;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Repeatedly sends native currency to one address", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "chains/cor-sender/config.toml")]
    config: String,

    #[arg(long)]
    rpc_url: Option<String>,

    /// Recipient address
    #[arg(long)]
    to: Option<String>,

    /// Amount per transaction, in ether units
    #[arg(long)]
    amount: Option<String>,

    /// Seconds between transactions
    #[arg(long)]
    delay: Option<u64>,

    /// Fallback gas limit, at least 21000
    #[arg(long)]
    gas_limit: Option<u64>,

    #[arg(long)]
    explorer_url: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            rpc_url: self.rpc_url.clone(),
            to: self.to.clone(),
            amount: self.amount.clone(),
            delay_seconds: self.delay,
            gas_limit: self.gas_limit,
            explorer_url: self.explorer_url.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _log_guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();
    info!("Loading config from: {}", args.config);

    let settings = SenderSettings::load(&args.config, &args.overrides())
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    let config = settings
        .into_sender_config(env::var("PRIVATE_KEY").ok())
        .context("Invalid configuration")?;

    let account = Account::from_secret(&config.private_key).context("Invalid private key")?;
    let plan = TransferPlan::from_config(&config)?;
    let symbol = plan.symbol.clone();
    plan.log_banner(account.address());

    info!("🔗 Connecting to {}", config.rpc_url);
    let rpc = EthersRpc::new(
        &config.rpc_url,
        Duration::from_secs(config.rpc_timeout_seconds),
    )?;

    let result =
        WorkerRunner::run_until_shutdown(|token| run(rpc, account, plan, token)).await;

    match result {
        Ok(stats) => stats.report(&symbol),
        Err(SetupError::Unreachable { endpoint }) => {
            error!("❌ Cannot connect to RPC: {}", endpoint);
        }
        Err(e) => error!("❌ Setup failed: {}", e),
    }

    Ok(())
}
