//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with external systems.

mod command;
pub mod killer;
pub mod scanner;

// Re-export main types for convenience
pub use command::SystemCommandRunner;
pub use killer::{CommandKiller, ProcessKiller};
#[cfg(unix)]
pub use killer::SignalKiller;
pub use scanner::{PortEnumerator, ToolCandidate};
