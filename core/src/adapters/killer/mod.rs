//! Process terminator adapters.
//!
//! Graceful requests use the catchable signal (SIGTERM, plain `taskkill`);
//! forceful requests use the non-catchable one (SIGKILL, `taskkill /F`).
//! Neither adapter retries or escalates on its own.

mod command;
#[cfg(unix)]
mod signal;

use crate::adapters::SystemCommandRunner;
use crate::domain::Platform;
use crate::error::{Error, Result};
use crate::ports::ProcessKillerPort;

pub use command::CommandKiller;
#[cfg(unix)]
pub use signal::SignalKiller;

/// Map a kill utility's failure text onto the termination taxonomy.
pub fn classify_failure(pid: u32, text: &str) -> Error {
    let lower = text.to_lowercase();
    if lower.contains("no such process") || lower.contains("not found") {
        return Error::ProcessNotFound { pid };
    }
    if lower.contains("permission") || lower.contains("denied") || lower.contains("not permitted")
    {
        return Error::PermissionDenied { pid };
    }
    Error::KillFailed {
        pid,
        reason: if text.is_empty() {
            "kill command failed".to_string()
        } else {
            text.to_string()
        },
    }
}

/// The default terminator for a platform.
///
/// Unix hosts signal directly; elsewhere the kill utility is invoked.
pub enum ProcessKiller {
    #[cfg(unix)]
    Signal(SignalKiller),
    Command(CommandKiller<SystemCommandRunner>),
}

impl ProcessKiller {
    /// Create the terminator for the current platform.
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            #[cfg(unix)]
            Platform::Posix => ProcessKiller::Signal(SignalKiller::new()),
            _ => ProcessKiller::Command(CommandKiller::new(platform, SystemCommandRunner::new())),
        }
    }
}

impl Default for ProcessKiller {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessKillerPort for ProcessKiller {
    async fn terminate(&self, pid: u32, forceful: bool) -> Result<()> {
        match self {
            #[cfg(unix)]
            ProcessKiller::Signal(inner) => inner.terminate(pid, forceful).await,
            ProcessKiller::Command(inner) => inner.terminate(pid, forceful).await,
        }
    }

    async fn is_running(&self, pid: u32) -> bool {
        match self {
            #[cfg(unix)]
            ProcessKiller::Signal(inner) => inner.is_running(pid).await,
            ProcessKiller::Command(inner) => inner.is_running(pid).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        assert!(matches!(
            classify_failure(1, "kill: (1) - No such process"),
            Error::ProcessNotFound { pid: 1 }
        ));
        assert!(matches!(
            classify_failure(2, "ERROR: The process \"2\" not found."),
            Error::ProcessNotFound { pid: 2 }
        ));
    }

    #[test]
    fn test_classify_permission() {
        assert!(matches!(
            classify_failure(3, "kill: (3) - Operation not permitted"),
            Error::PermissionDenied { pid: 3 }
        ));
        assert!(matches!(
            classify_failure(4, "Access is denied."),
            Error::PermissionDenied { pid: 4 }
        ));
    }

    #[test]
    fn test_classify_other_keeps_text() {
        match classify_failure(5, "kill: invalid signal") {
            Error::KillFailed { pid, reason } => {
                assert_eq!(pid, 5);
                assert_eq!(reason, "kill: invalid signal");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_windows_uses_command_killer() {
        assert!(matches!(
            ProcessKiller::for_platform(Platform::Windows),
            ProcessKiller::Command(_)
        ));
    }
}
