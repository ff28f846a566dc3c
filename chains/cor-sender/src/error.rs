use crate::utils::units::format_ether;
use ethers::types::U256;
use thiserror::Error;

/// A failed call against the chain RPC endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{method} failed: {message}")]
pub struct RpcError {
    pub method: &'static str,
    pub message: String,
}

impl RpcError {
    pub fn new(method: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            method,
            message: err.to_string(),
        }
    }
}

/// Failures before the loop starts. All of them end the run without statistics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Cannot connect to RPC at {endpoint}")]
    Unreachable { endpoint: String },

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// Why a single send attempt did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error(
        "Insufficient balance! Need: {}, Have: {}",
        ether(.need),
        ether(.have)
    )]
    InsufficientFunds { need: U256, have: U256 },

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("Signing failed: {0}")]
    Signing(String),
}

fn ether(wei: &U256) -> String {
    format_ether(*wei)
}
