//! Direct signal delivery on Unix using `nix`.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ports::ProcessKillerPort;

/// Sends SIGTERM / SIGKILL with `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalKiller;

impl SignalKiller {
    pub fn new() -> Self {
        Self
    }

    fn pid(pid: u32) -> Result<Pid> {
        i32::try_from(pid)
            .ok()
            .filter(|p| *p > 0)
            .map(Pid::from_raw)
            .ok_or_else(|| Error::KillFailed {
                pid,
                reason: "PID out of range".to_string(),
            })
    }
}

/// Map an errno from `kill(2)` onto the termination taxonomy.
fn classify_errno(pid: u32, errno: Errno) -> Error {
    match errno {
        Errno::ESRCH => Error::ProcessNotFound { pid },
        Errno::EPERM => Error::PermissionDenied { pid },
        other => Error::KillFailed {
            pid,
            reason: other.desc().to_string(),
        },
    }
}

impl ProcessKillerPort for SignalKiller {
    async fn terminate(&self, pid: u32, forceful: bool) -> Result<()> {
        let target = Self::pid(pid)?;
        let signal = if forceful {
            Signal::SIGKILL
        } else {
            Signal::SIGTERM
        };
        debug!(pid = pid, signal = signal.as_str(), "Sending signal to process");

        kill(target, signal).map_err(|errno| {
            let err = classify_errno(pid, errno);
            if matches!(err, Error::PermissionDenied { .. }) {
                warn!(pid = pid, "Permission denied to kill process");
            }
            err
        })
    }

    async fn is_running(&self, pid: u32) -> bool {
        let Ok(target) = Self::pid(pid) else {
            return false;
        };
        match kill(target, None) {
            Ok(()) => true,
            // Exists but belongs to someone else
            Err(Errno::EPERM) => true,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_errno() {
        assert!(matches!(
            classify_errno(7, Errno::ESRCH),
            Error::ProcessNotFound { pid: 7 }
        ));
        assert!(matches!(
            classify_errno(7, Errno::EPERM),
            Error::PermissionDenied { pid: 7 }
        ));
        assert!(matches!(
            classify_errno(7, Errno::EINVAL),
            Error::KillFailed { pid: 7, .. }
        ));
    }

    #[tokio::test]
    async fn test_current_process_is_running() {
        let killer = SignalKiller::new();
        assert!(killer.is_running(std::process::id()).await);
    }

    #[tokio::test]
    async fn test_out_of_range_pid() {
        let killer = SignalKiller::new();
        assert!(!killer.is_running(u32::MAX).await);
        let err = killer.terminate(u32::MAX, true).await.unwrap_err();
        assert!(matches!(err, Error::KillFailed { .. }));
    }

    #[tokio::test]
    async fn test_terminate_spawned_child() {
        let mut child = tokio::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .unwrap();
        let pid = child.id().unwrap();

        let killer = SignalKiller::new();
        killer.terminate(pid, true).await.unwrap();
        let status = child.wait().await.unwrap();
        assert!(!status.success());
    }
}
