//! Conversions between display amounts and wei.

use core_logic::ConfigError;
use ethers::types::{H256, U256};
use ethers::utils::{format_units, parse_units};

pub const ETHER_DECIMALS: usize = 18;
pub const GWEI_DECIMALS: usize = 9;

/// Decimal places shown for ether amounts.
const ETHER_PRECISION: usize = 6;
/// Decimal places shown for gas prices.
const GWEI_PRECISION: usize = 2;

/// Parses a decimal ether amount such as `"0.0001"` into wei.
pub fn to_wei(amount: &str) -> Result<U256, ConfigError> {
    let amount = normalize_decimal(amount);
    let wei = parse_units(&amount, "ether")
        .map_err(|e| ConfigError::invalid("amount", e.to_string()))?;
    Ok(wei.into())
}

/// Wei as ether, rounded to 6 decimals (`"0.000100"`).
pub fn format_ether(wei: U256) -> String {
    format_rounded(wei, "ether", ETHER_DECIMALS, ETHER_PRECISION)
}

/// Wei as gwei, rounded to 2 decimals (`"1.50"`).
pub fn format_gwei(wei: U256) -> String {
    format_rounded(wei, "gwei", GWEI_DECIMALS, GWEI_PRECISION)
}

/// First 20 characters of the 0x-prefixed hash, as shown in status lines.
pub fn short_hash(hash: &H256) -> String {
    let full = format!("{:?}", hash);
    full.chars().take(20).collect()
}

/// Rounds half up in wei, then cuts the `format_units` output to `precision` places.
fn format_rounded(value: U256, units: &str, decimals: usize, precision: usize) -> String {
    let step = U256::exp10(decimals - precision);
    let rounded = value.saturating_add(step / 2) / step * step;

    let text = match format_units(rounded, units) {
        Ok(text) => text,
        Err(_) => return format!("{} wei", value),
    };
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(precision)
        .collect();
    format!("{}.{}", whole, fraction)
}

/// `".5"` -> `"0.5"`, `"2."` -> `"2"`.
fn normalize_decimal(amount: &str) -> String {
    let amount = amount.trim();
    let amount = amount.strip_suffix('.').unwrap_or(amount);
    if amount.starts_with('.') {
        format!("0{}", amount)
    } else {
        amount.to_string()
    }
}
