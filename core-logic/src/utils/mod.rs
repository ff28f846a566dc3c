//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod logger;
pub(crate) mod runner;

// Selective exports - only public utilities
pub use logger::{colorize, setup_logger, TASK_RESULT_TARGET};
pub use runner::{spawn_signal_listener, WorkerRunner};
