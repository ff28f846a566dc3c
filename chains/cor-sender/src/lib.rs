//! # COR Sender
//!
//! Repeatedly sends a fixed native-currency transfer from one account to
//! another on an EVM chain until stopped.
//!
//! - [`config`] - Layered settings (file, environment, CLI)
//! - [`sender`] - The send loop and its final statistics
//! - [`rpc`] - The chain operations the loop needs, backed by ethers
//! - [`account`] - Signing key and derived address
//! - [`intent`] - A single transfer before signing
//! - [`utils::units`] - Wei / display conversions

pub mod account;
pub mod config;
pub mod error;
pub mod intent;
pub mod rpc;
pub mod sender;
pub mod utils;

pub use account::Account;
pub use error::{RpcError, SendError, SetupError};
pub use intent::TransferIntent;
pub use rpc::{ChainRpc, EthersRpc};
pub use sender::{run, LoopExit, LoopState, RunStats, SendOutcome, Sender, SentTransfer, TransferPlan};
