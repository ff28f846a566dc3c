use anyhow::Result;
use config::{Config, Environment, File};
use core_logic::{
    CoreError, SecretKey, SenderConfig, DEFAULT_AMOUNT, DEFAULT_DELAY_SECONDS,
    DEFAULT_RPC_TIMEOUT_SECONDS, DEFAULT_SYMBOL, TRANSFER_GAS_LIMIT,
};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `SENDER_RPC_URL`.
pub const ENV_PREFIX: &str = "SENDER";

/// Raw settings as read from `config.toml` and `SENDER_*` variables.
///
/// Holds the raw `private_key`; does not implement `Debug`.
#[derive(Deserialize, Clone)]
pub struct SenderSettings {
    #[serde(default)]
    pub private_key: Option<String>,
    pub rpc_url: Option<String>,
    pub to: Option<String>,
    #[serde(default = "default_amount")]
    pub amount: String,
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: u64,
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
    #[serde(default = "default_rpc_timeout_seconds")]
    pub rpc_timeout_seconds: u64,
    pub explorer_url: Option<String>,
    #[serde(default = "default_symbol")]
    pub symbol: String,
}

/// Command line values, applied on top of file and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub rpc_url: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
    pub delay_seconds: Option<u64>,
    pub gas_limit: Option<u64>,
    pub explorer_url: Option<String>,
}

fn default_amount() -> String {
    DEFAULT_AMOUNT.to_string()
}

fn default_delay_seconds() -> u64 {
    DEFAULT_DELAY_SECONDS
}

fn default_gas_limit() -> u64 {
    TRANSFER_GAS_LIMIT
}

fn default_rpc_timeout_seconds() -> u64 {
    DEFAULT_RPC_TIMEOUT_SECONDS
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

impl SenderSettings {
    /// File (optional) < `SENDER_*` environment < CLI overrides.
    pub fn load(path: &str, overrides: &Overrides) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("rpc_url", overrides.rpc_url.clone())?
            .set_override_option("to", overrides.to.clone())?
            .set_override_option("amount", overrides.amount.clone())?
            .set_override_option("delay_seconds", overrides.delay_seconds)?
            .set_override_option("gas_limit", overrides.gas_limit)?
            .set_override_option("explorer_url", overrides.explorer_url.clone())?
            .build()?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }

    /// Resolves the key (settings first, then `fallback_key`) and validates
    /// everything before it reaches the loop.
    pub fn into_sender_config(self, fallback_key: Option<String>) -> Result<SenderConfig, CoreError> {
        let private_key = self
            .private_key
            .filter(|key| !key.trim().is_empty())
            .or(fallback_key)
            .unwrap_or_default();

        let config = SenderConfig {
            private_key: SecretKey::new(private_key),
            rpc_url: self.rpc_url.unwrap_or_default().trim().to_string(),
            recipient: self.to.unwrap_or_default().trim().to_string(),
            amount: self.amount.trim().to_string(),
            delay_seconds: self.delay_seconds,
            gas_limit: self.gas_limit,
            rpc_timeout_seconds: self.rpc_timeout_seconds,
            explorer_url: self.explorer_url.filter(|url| !url.trim().is_empty()),
            symbol: self.symbol,
        };

        config.validate()?;
        Ok(config)
    }
}
