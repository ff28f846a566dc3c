use core_logic::config::{validate_address, validate_amount, validate_rpc_url};
use core_logic::{
    ConfigError, CoreError, SecretKey, SenderConfig, WalletError, DEFAULT_AMOUNT,
    DEFAULT_DELAY_SECONDS, DEFAULT_RPC_TIMEOUT_SECONDS, DEFAULT_SYMBOL, TRANSFER_GAS_LIMIT,
};

const KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

fn config() -> SenderConfig {
    SenderConfig {
        private_key: SecretKey::new(KEY),
        rpc_url: "https://rpc.example.com".to_string(),
        recipient: "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC".to_string(),
        amount: DEFAULT_AMOUNT.to_string(),
        delay_seconds: DEFAULT_DELAY_SECONDS,
        gas_limit: TRANSFER_GAS_LIMIT,
        rpc_timeout_seconds: DEFAULT_RPC_TIMEOUT_SECONDS,
        explorer_url: None,
        symbol: DEFAULT_SYMBOL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_zero_delay_is_allowed() {
        let mut config = config();
        config.delay_seconds = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_higher_gas_limit_is_allowed() {
        let mut config = config();
        config.gas_limit = 50_000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_explorer_url_rejected() {
        let mut config = config();
        config.explorer_url = Some("   ".to_string());
        assert_eq!(
            config.validate(),
            Err(CoreError::Config(ConfigError::invalid(
                "explorer_url",
                "must not be blank"
            )))
        );
    }

    #[test]
    fn test_blank_symbol_rejected() {
        let mut config = config();
        config.symbol = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_secret_key_is_trimmed() {
        let key = SecretKey::new(format!("  {}\n", KEY));
        assert_eq!(key.expose(), KEY);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::missing("rpc_url").to_string(),
            "Missing required configuration field: 'rpc_url'"
        );
        assert_eq!(
            WalletError::InvalidKeyLength { length: 10 }.to_string(),
            "Private key has wrong length: expected 64 hex chars, got 10"
        );
        let wrapped: CoreError = ConfigError::invalid("amount", "must be greater than 0").into();
        assert_eq!(
            wrapped.to_string(),
            "Invalid value for 'amount': must be greater than 0"
        );
    }

    #[test]
    fn test_standalone_validators() {
        assert!(validate_rpc_url("https://rpc.example.com/v1").is_ok());
        assert!(validate_rpc_url("ws://rpc.example.com").is_err());
        assert!(validate_address("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC").is_ok());
        assert!(validate_amount("12.5").is_ok());
        assert!(validate_amount("abc").is_err());
    }
}
