use crate::error::{ConfigError, CoreError, WalletError};
use std::fmt;
use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Amount sent per transaction when none is configured, in ether.
pub const DEFAULT_AMOUNT: &str = "0.0001";
pub const DEFAULT_DELAY_SECONDS: u64 = 5;
/// Minimum gas a plain value transfer costs on EVM chains.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_SYMBOL: &str = "COR";

/// Ether has 18 decimals; anything finer cannot be expressed in wei.
const MAX_AMOUNT_DECIMALS: usize = 18;

/// Private key material. Wiped from memory on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***REDACTED***)")
    }
}

/// Fully resolved settings for the sender loop.
///
/// Built by the chain binary from its layered sources (file, env, CLI) and
/// checked with [`SenderConfig::validate`] before anything touches the network.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub private_key: SecretKey,
    pub rpc_url: String,
    pub recipient: String,
    /// Decimal amount in ether, e.g. `"0.0001"`.
    pub amount: String,
    pub delay_seconds: u64,
    pub gas_limit: u64,
    pub rpc_timeout_seconds: u64,
    pub explorer_url: Option<String>,
    /// Native currency ticker used in log lines.
    pub symbol: String,
}

impl SenderConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_private_key(&self.private_key)?;
        validate_rpc_url(&self.rpc_url)?;
        validate_address(&self.recipient)?;
        validate_amount(&self.amount)?;

        if self.gas_limit < TRANSFER_GAS_LIMIT {
            return Err(ConfigError::invalid(
                "gas_limit",
                format!("must be at least {}", TRANSFER_GAS_LIMIT),
            )
            .into());
        }
        if self.rpc_timeout_seconds == 0 {
            return Err(
                ConfigError::invalid("rpc_timeout_seconds", "must be greater than 0").into(),
            );
        }
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::invalid("symbol", "must not be blank").into());
        }
        if let Some(url) = &self.explorer_url {
            if url.trim().is_empty() {
                return Err(ConfigError::invalid("explorer_url", "must not be blank").into());
            }
        }

        Ok(())
    }
}

pub fn validate_private_key(key: &SecretKey) -> Result<(), CoreError> {
    if key.is_empty() {
        return Err(ConfigError::missing("private_key").into());
    }

    let raw = strip_hex_prefix(key.expose());
    if raw.len() != 64 {
        return Err(WalletError::InvalidKeyLength { length: raw.len() }.into());
    }
    if hex::decode(raw).is_err() {
        return Err(WalletError::InvalidKeyFormat.into());
    }
    Ok(())
}

pub fn validate_rpc_url(url: &str) -> Result<(), ConfigError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConfigError::missing("rpc_url"));
    }
    match Url::parse(url) {
        Ok(parsed)
            if matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty()) =>
        {
            Ok(())
        }
        _ => Err(ConfigError::InvalidRpcUrl {
            url: url.to_string(),
        }),
    }
}

/// Syntactic check only: `0x` followed by 40 hex characters.
pub fn validate_address(address: &str) -> Result<(), ConfigError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ConfigError::missing("to"));
    }

    let valid = match address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) {
        Some(raw) => raw.len() == 40 && hex::decode(raw).is_ok(),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidAddress {
            address: address.to_string(),
        })
    }
}

pub fn validate_amount(amount: &str) -> Result<(), ConfigError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(ConfigError::missing("amount"));
    }

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    if whole.is_empty() && fraction.is_empty() {
        return Err(ConfigError::invalid("amount", "not a decimal number"));
    }
    if !digits_only(whole) || !digits_only(fraction) {
        return Err(ConfigError::invalid("amount", "not a decimal number"));
    }
    if fraction.len() > MAX_AMOUNT_DECIMALS {
        return Err(ConfigError::invalid(
            "amount",
            format!("more than {} decimal places", MAX_AMOUNT_DECIMALS),
        ));
    }
    if amount.chars().all(|c| c == '0' || c == '.') {
        return Err(ConfigError::invalid("amount", "must be greater than 0"));
    }
    Ok(())
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TO: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    fn sample() -> SenderConfig {
        SenderConfig {
            private_key: SecretKey::new(KEY),
            rpc_url: "https://rpc.example.com".to_string(),
            recipient: TO.to_string(),
            amount: DEFAULT_AMOUNT.to_string(),
            delay_seconds: DEFAULT_DELAY_SECONDS,
            gas_limit: TRANSFER_GAS_LIMIT,
            rpc_timeout_seconds: DEFAULT_RPC_TIMEOUT_SECONDS,
            explorer_url: None,
            symbol: DEFAULT_SYMBOL.to_string(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_key_with_prefix_accepted() {
        let mut config = sample();
        config.private_key = SecretKey::new(format!("0x{}", KEY));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_key_is_missing_field() {
        let mut config = sample();
        config.private_key = SecretKey::new("  ");
        assert_eq!(
            config.validate(),
            Err(CoreError::Config(ConfigError::missing("private_key")))
        );
    }

    #[test]
    fn test_short_key_rejected() {
        let mut config = sample();
        config.private_key = SecretKey::new("abcd");
        assert_eq!(
            config.validate(),
            Err(CoreError::Wallet(WalletError::InvalidKeyLength { length: 4 }))
        );
    }

    #[test]
    fn test_non_hex_key_rejected() {
        let mut config = sample();
        config.private_key = SecretKey::new("z".repeat(64));
        assert_eq!(
            config.validate(),
            Err(CoreError::Wallet(WalletError::InvalidKeyFormat))
        );
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let printed = format!("{:?}", sample());
        assert!(!printed.contains(KEY));
        assert!(printed.contains("REDACTED"));
    }

    #[test]
    fn test_rpc_url_scheme_required() {
        assert!(validate_rpc_url("http://localhost:8545").is_ok());
        assert_eq!(
            validate_rpc_url("localhost:8545"),
            Err(ConfigError::InvalidRpcUrl {
                url: "localhost:8545".to_string()
            })
        );
        assert_eq!(validate_rpc_url(""), Err(ConfigError::missing("rpc_url")));
        assert!(validate_rpc_url("https://").is_err());
    }

    #[test]
    fn test_rpc_url_must_parse() {
        assert!(validate_rpc_url("https://rpc.example.com:8545/v1?key=abc").is_ok());
        assert_eq!(
            validate_rpc_url("http://exa mple.com"),
            Err(ConfigError::InvalidRpcUrl {
                url: "http://exa mple.com".to_string()
            })
        );
        assert!(validate_rpc_url("http://[::1").is_err());
        assert!(validate_rpc_url("ftp://rpc.example.com").is_err());
    }

    #[test]
    fn test_address_syntax() {
        assert!(validate_address(TO).is_ok());
        assert!(validate_address("0x1234").is_err());
        assert!(validate_address("70997970C51812dc3A010C7d01b50e0d17dc79C8").is_err());
        assert!(validate_address("0xZZ997970C51812dc3A010C7d01b50e0d17dc79C8").is_err());
        assert_eq!(validate_address(""), Err(ConfigError::missing("to")));
    }

    #[test]
    fn test_amount_parsing_rules() {
        assert!(validate_amount("0.0001").is_ok());
        assert!(validate_amount("1").is_ok());
        assert!(validate_amount(".5").is_ok());
        assert!(validate_amount("2.").is_ok());
        assert!(validate_amount("0").is_err());
        assert!(validate_amount("0.000").is_err());
        assert!(validate_amount("-1").is_err());
        assert!(validate_amount("1e-4").is_err());
        assert!(validate_amount(".").is_err());
        assert!(validate_amount("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_gas_limit_below_transfer_minimum() {
        let mut config = sample();
        config.gas_limit = 20_999;
        assert!(matches!(
            config.validate(),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = sample();
        config.rpc_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
