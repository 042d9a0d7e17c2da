//! Host platform family.

use serde::{Deserialize, Serialize};

/// Platform family that decides which diagnostic tools and signals apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    /// macOS, Linux and other Unix-likes (`lsof`, `kill`).
    Posix,
    /// Windows (`netstat`, `taskkill`).
    Windows,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Name of the tool used to list listening sockets.
    pub fn listing_tool(&self) -> &'static str {
        match self {
            Platform::Posix => "lsof",
            Platform::Windows => "netstat",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Posix => write!(f, "POSIX"),
            Platform::Windows => write!(f, "Windows"),
        }
    }
}
