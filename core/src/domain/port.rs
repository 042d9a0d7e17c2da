//! Listening-socket domain models.

use serde::{Deserialize, Serialize};

/// Process name used when the source tool cannot report one.
pub const UNKNOWN_PROCESS: &str = "unknown";

// ============================================================================
// PortRecord
// ============================================================================

/// One observed listening socket bound to one process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRecord {
    /// The port number (e.g., 3000, 8080).
    pub port: u16,
    /// Process ID of the process listening on this port.
    pub pid: u32,
    /// Short name of the executable, or `"unknown"`.
    pub process_name: String,
    /// Local address as reported by the tool, including the port suffix.
    pub address: String,
}

impl PortRecord {
    /// Create a record from parsed tool output.
    pub fn new(
        port: u16,
        pid: u32,
        process_name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            port,
            pid,
            process_name: process_name.into(),
            address: address.into(),
        }
    }

    /// Create a record whose owning process name is unknown.
    pub fn unnamed(port: u16, pid: u32, address: impl Into<String>) -> Self {
        Self::new(port, pid, UNKNOWN_PROCESS, address)
    }

    /// Whether the process name contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercase.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.process_name.to_lowercase().contains(needle)
    }
}

impl std::fmt::Display for PortRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PID {}: {} on port {}",
            self.pid, self.process_name, self.port
        )
    }
}

// ============================================================================
// PortQuery
// ============================================================================

/// A port target as supplied by a caller.
///
/// Text input is normalized the way a user types it: surrounding whitespace
/// is ignored, and anything that is not a port number becomes a query that
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortQuery {
    raw: String,
    port: Option<u16>,
}

impl PortQuery {
    /// The normalized port, if the input was a valid port number.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Whether `record` listens on the queried port.
    pub fn matches(&self, record: &PortRecord) -> bool {
        self.port == Some(record.port)
    }
}

impl From<u16> for PortQuery {
    fn from(port: u16) -> Self {
        Self {
            raw: port.to_string(),
            port: Some(port),
        }
    }
}

impl From<&str> for PortQuery {
    fn from(input: &str) -> Self {
        Self {
            raw: input.to_string(),
            port: input.trim().parse().ok(),
        }
    }
}

impl From<String> for PortQuery {
    fn from(input: String) -> Self {
        PortQuery::from(input.as_str())
    }
}

impl std::fmt::Display for PortQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Keep the records listening on the queried port.
pub fn filter_by_port(records: &[PortRecord], query: &PortQuery) -> Vec<PortRecord> {
    records
        .iter()
        .filter(|r| query.matches(r))
        .cloned()
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnamed_record() {
        let record = PortRecord::unnamed(445, 4, "0.0.0.0:445");
        assert_eq!(record.process_name, "unknown");
        assert_eq!(record.port, 445);
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let record = PortRecord::new(3000, 1, "Node", "*:3000");
        assert!(record.name_contains("node"));
        assert!(!record.name_contains("deno"));
    }

    #[test]
    fn test_query_from_text() {
        assert_eq!(PortQuery::from("3000").port(), Some(3000));
        assert_eq!(PortQuery::from(" 8080 ").port(), Some(8080));
        assert_eq!(PortQuery::from("abc").port(), None);
        assert_eq!(PortQuery::from("99999").port(), None);
        assert_eq!(PortQuery::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_filter_by_port() {
        let records = vec![
            PortRecord::new(80, 1, "nginx", "*:80"),
            PortRecord::new(3000, 2, "node", "*:3000"),
            PortRecord::new(3000, 3, "node", "[::1]:3000"),
        ];
        assert_eq!(filter_by_port(&records, &PortQuery::from(3000)).len(), 2);
        assert!(filter_by_port(&records, &PortQuery::from("nope")).is_empty());
    }

    #[test]
    fn test_display() {
        let record = PortRecord::new(3000, 1234, "node", "*:3000");
        assert_eq!(record.to_string(), "PID 1234: node on port 3000");
    }
}
