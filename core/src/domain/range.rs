//! Port range validation and summaries.

use serde::{Deserialize, Serialize};

use super::PortRecord;
use crate::error::{Error, Result};

const MIN_PORT: i64 = 1;
const MAX_PORT: i64 = 65535;

/// A validated, closed port interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Validate numeric bounds.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange(
                "start port must be less than end port".to_string(),
            ));
        }
        if start < MIN_PORT || end > MAX_PORT {
            return Err(Error::InvalidRange(
                "ports must be between 1 and 65535".to_string(),
            ));
        }
        // Both bounds are inside 1..=65535 here.
        Ok(Self {
            start: start as u16,
            end: end as u16,
        })
    }

    /// Validate textual bounds as typed on a command line.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let (Ok(start), Ok(end)) = (start.trim().parse::<i64>(), end.trim().parse::<i64>()) else {
            return Err(Error::InvalidRange("ports must be numbers".to_string()));
        };
        Self::new(start, end)
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of ports in the interval.
    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    /// A validated range is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, port: u16) -> bool {
        (self.start..=self.end).contains(&port)
    }

    /// Summarize usage of this range from a full enumeration.
    pub fn summarize(&self, records: &[PortRecord]) -> PortRangeSummary {
        let ports: Vec<PortRecord> = records
            .iter()
            .filter(|r| self.contains(r.port))
            .cloned()
            .collect();
        let total = self.len();
        let used = ports.len();

        PortRangeSummary {
            start: self.start,
            end: self.end,
            total,
            used,
            free: total.saturating_sub(used),
            ports,
        }
    }
}

impl std::fmt::Display for PortRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Usage of a closed port interval.
///
/// `used` counts records, so a port shared by several processes counts once
/// per process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRangeSummary {
    pub start: u16,
    pub end: u16,
    pub total: usize,
    pub used: usize,
    pub free: usize,
    pub ports: Vec<PortRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(result: Result<PortRange>, fragment: &str) {
        match result {
            Err(Error::InvalidRange(msg)) => assert!(msg.contains(fragment), "{msg}"),
            other => panic!("expected InvalidRange, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_reversed_range() {
        assert_invalid(PortRange::new(5000, 4000), "less than");
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        assert_invalid(PortRange::new(0, 100), "between 1 and 65535");
        assert_invalid(PortRange::new(1, 70000), "between 1 and 65535");
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert_invalid(PortRange::parse("abc", "100"), "numbers");
        assert_invalid(PortRange::parse("1", ""), "numbers");
    }

    #[test]
    fn test_full_range_is_valid() {
        let range = PortRange::new(1, 65535).unwrap();
        assert_eq!(range.len(), 65535);
    }

    #[test]
    fn test_summarize() {
        let range = PortRange::parse("8000", "8010").unwrap();
        let records = vec![
            PortRecord::new(80, 1, "nginx", "*:80"),
            PortRecord::new(8000, 2, "python3", "*:8000"),
            PortRecord::new(8010, 3, "java", "*:8010"),
            PortRecord::new(8011, 4, "java", "*:8011"),
        ];
        let summary = range.summarize(&records);
        assert_eq!(summary.total, 11);
        assert_eq!(summary.used, 2);
        assert_eq!(summary.free, 9);
        assert_eq!(summary.used + summary.free, 11);
        assert_eq!(summary.ports[0].port, 8000);
    }
}
