//! Domain layer - Pure data models and filters.
//!
//! This module contains the records produced by enumeration and termination.
//! These types have no I/O dependencies and can be tested in isolation.

mod kill;
mod platform;
mod port;
mod range;
mod zombie;

// Re-export all domain types
pub use kill::{CleanupReport, KillResult, PortFailure};
pub use platform::Platform;
pub use port::{filter_by_port, PortQuery, PortRecord, UNKNOWN_PROCESS};
pub use range::{PortRange, PortRangeSummary};
pub use zombie::{ZombieWatchList, DEFAULT_ZOMBIE_NAMES};
