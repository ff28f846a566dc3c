//! # Core Logic - Shared Utilities for the Sender Workspace
//!
//! Chain-agnostic pieces used by the chain binaries: validated configuration,
//! typed errors, logger setup and the signal-to-cancellation runner.
//!
//! ## Modules
//!
//! - [`config`] - Sender configuration and validation rules
//! - [`error`] - Typed error handling with thiserror
//! - `utils` - Logger and shutdown runner

pub mod config;
pub mod error;
pub(crate) mod utils;

pub use config::{
    SecretKey, SenderConfig, DEFAULT_AMOUNT, DEFAULT_DELAY_SECONDS, DEFAULT_RPC_TIMEOUT_SECONDS,
    DEFAULT_SYMBOL, TRANSFER_GAS_LIMIT,
};
pub use error::{ConfigError, CoreError, WalletError};

pub use utils::{colorize, setup_logger, spawn_signal_listener, WorkerRunner, TASK_RESULT_TARGET};
