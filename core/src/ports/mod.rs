//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod killer;
mod runner;
mod scanner;

pub use killer::ProcessKillerPort;
pub use runner::{CommandOutput, CommandRunner};
pub use scanner::PortScannerPort;
