//! Port scanner port (interface).

use crate::domain::PortRecord;
use crate::error::Result;

/// Port for enumerating listening sockets.
///
/// Implementations handle platform-specific details (lsof, netstat, etc.)
pub trait PortScannerPort: Send + Sync {
    /// Scan for all listening TCP ports.
    ///
    /// Returns records sorted by port, unique per (pid, port).
    fn scan(&self) -> impl std::future::Future<Output = Result<Vec<PortRecord>>> + Send;
}
