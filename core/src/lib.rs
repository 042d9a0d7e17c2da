//! portguard core library
//!
//! Cross-platform library for resolving listening TCP ports to the processes
//! that own them. Provides functionality to:
//! - List listening TCP sockets with their owning PID and process name
//! - Look up a single port or summarize usage of a port range
//! - Kill the processes on a port (gracefully, forcefully, or escalating)
//! - Find and clean up leftover dev servers ("zombies") by process name
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models and filters
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! - macOS / Linux / BSD: Uses `lsof`, signals via `kill(2)`
//! - Windows: Uses `netstat` and `taskkill`

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export domain types (primary API)
pub use domain::{
    CleanupReport, KillResult, Platform, PortFailure, PortQuery, PortRange, PortRangeSummary,
    PortRecord, ZombieWatchList,
};

// Re-export other commonly used types
pub use adapters::{PortEnumerator, ProcessKiller, SystemCommandRunner};
pub use application::PortService;
pub use config::Settings;
pub use error::{Error, Result};

/// The service wired to the real system tools.
pub type SystemPortService = PortService<PortEnumerator<SystemCommandRunner>, ProcessKiller>;

/// Build a [`SystemPortService`] for `platform` from `settings`.
pub fn system_service(platform: Platform, settings: &Settings) -> SystemPortService {
    let enumerator = PortEnumerator::with_runner(platform, SystemCommandRunner::new(), settings);
    PortService::new(enumerator, ProcessKiller::for_platform(platform))
        .with_zombie_watch_list(settings.zombie_watch_list())
}
