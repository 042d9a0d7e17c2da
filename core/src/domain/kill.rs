//! Termination outcome models.

use serde::{Deserialize, Serialize};

use super::PortRecord;

/// Outcome of one termination attempt against one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillResult {
    /// The record that was targeted.
    #[serde(flatten)]
    pub record: PortRecord,
    /// Whether the signal was delivered.
    pub success: bool,
    /// Human-readable reason, present only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KillResult {
    /// A successful attempt.
    pub fn succeeded(record: PortRecord) -> Self {
        Self {
            record,
            success: true,
            error: None,
        }
    }

    /// A failed attempt with its reason.
    pub fn failed(record: PortRecord, error: impl Into<String>) -> Self {
        Self {
            record,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// A port that could not be processed at all during a cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortFailure {
    pub port: u16,
    pub error: String,
}

/// Aggregated outcome of a zombie cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    /// One entry per attempted process.
    pub results: Vec<KillResult>,
    /// Ports that failed before any process on them could be attempted.
    pub port_failures: Vec<PortFailure>,
}

impl CleanupReport {
    /// Number of processes terminated.
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of failed processes plus failed ports.
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count() + self.port_failures.len()
    }

    /// Whether nothing was attempted.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.port_failures.is_empty()
    }
}
