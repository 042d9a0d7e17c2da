//! Error types for the portguard-core library.

use thiserror::Error;

/// Result type alias for portguard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during port enumeration and process termination.
#[derive(Error, Debug)]
pub enum Error {
    /// The diagnostic binary needed to list sockets is not installed.
    #[error("{tool} not found. Please install {tool} to use portguard.")]
    ToolNotFound { tool: String },

    /// The diagnostic tool ran but could not produce a listing.
    #[error("Failed to get active ports: {0}")]
    Enumeration(String),

    /// A port range bound was malformed or out of bounds.
    #[error("Invalid port range: {0}")]
    InvalidRange(String),

    /// Nothing is listening on the targeted port.
    #[error("No process found on port {port}")]
    NoProcessOnPort { port: String },

    /// The process exited before (or while) it was signalled.
    #[error("Process {pid} not found")]
    ProcessNotFound { pid: u32 },

    /// The OS refused to deliver the signal.
    #[error("Permission denied. Try running with sudo/administrator privileges.")]
    PermissionDenied { pid: u32 },

    /// Failed to kill a process for any other reason.
    #[error("Failed to kill process {pid}: {reason}")]
    KillFailed { pid: u32, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error concerns a single termination target.
    ///
    /// Batch operations record these per target instead of aborting.
    pub fn is_target_scoped(&self) -> bool {
        matches!(
            self,
            Error::ProcessNotFound { .. } | Error::PermissionDenied { .. } | Error::KillFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_not_found_message() {
        let err = Error::ToolNotFound {
            tool: "lsof".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "lsof not found. Please install lsof to use portguard."
        );
    }

    #[test]
    fn test_permission_message_suggests_elevation() {
        let err = Error::PermissionDenied { pid: 42 };
        assert!(err.to_string().contains("sudo/administrator"));
    }

    #[test]
    fn test_target_scoped() {
        assert!(Error::ProcessNotFound { pid: 1 }.is_target_scoped());
        assert!(Error::KillFailed {
            pid: 1,
            reason: "boom".to_string()
        }
        .is_target_scoped());
        assert!(!Error::Enumeration("x".to_string()).is_target_scoped());
        assert!(!Error::NoProcessOnPort {
            port: "3000".to_string()
        }
        .is_target_scoped());
    }
}
