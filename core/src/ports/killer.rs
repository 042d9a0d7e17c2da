//! Process killer port (interface).

use crate::error::Result;

/// Port for terminating processes.
///
/// Implementations handle platform-specific signal delivery and map failures
/// onto [`Error::ProcessNotFound`](crate::Error::ProcessNotFound),
/// [`Error::PermissionDenied`](crate::Error::PermissionDenied) or
/// [`Error::KillFailed`](crate::Error::KillFailed). They never retry.
pub trait ProcessKillerPort: Send + Sync {
    /// Send one termination request to `pid`.
    ///
    /// If `forceful` is true, sends the non-catchable signal (SIGKILL,
    /// `taskkill /F`). Otherwise sends the standard request (SIGTERM).
    fn terminate(
        &self,
        pid: u32,
        forceful: bool,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Check if a process is still running.
    fn is_running(&self, pid: u32) -> impl std::future::Future<Output = bool> + Send;
}
