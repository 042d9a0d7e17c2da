//! Parser for `netstat -ano` output (Windows).

use tracing::debug;

use crate::domain::PortRecord;

use super::utils::Utils;

/// Minimum whitespace-separated fields in a connection line.
const MIN_FIELDS: usize = 5;

/// Parse netstat connection-table lines into records.
///
/// Expects lines already reduced to listening sockets:
/// ```text
///   TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       1020
///   TCP    [::]:445               [::]:0                 LISTENING       4
/// ```
/// Columns used: local address (1) and PID (4). netstat does not report
/// process names in this mode, so every record is named `"unknown"`.
pub fn parse_netstat_output(output: &str) -> Vec<PortRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in output.trim().lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < MIN_FIELDS {
            skipped += 1;
            continue;
        }

        let address = parts[1];
        let (Some(port), Some(pid)) = (Utils::trailing_port(address), Utils::pid(parts[4])) else {
            skipped += 1;
            continue;
        };

        records.push(PortRecord::unnamed(port, pid, address));
    }

    if skipped > 0 {
        debug!(skipped = skipped, "Skipped unparsable netstat lines");
    }
    Utils::dedup_and_sort(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       1020\r\n\
  TCP    127.0.0.1:3000         0.0.0.0:0              LISTENING       5432\r\n\
  TCP    [::]:135               [::]:0                 LISTENING       1020\r\n\
  TCP    0.0.0.0:445            0.0.0.0:0              LISTENING       4\r\n";

    #[test]
    fn test_parse_netstat_output() {
        let records = parse_netstat_output(SAMPLE);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].port, 135);
        assert_eq!(records[0].pid, 1020);
        assert_eq!(records[0].address, "0.0.0.0:135");
        assert_eq!(records[1].port, 445);
        assert_eq!(records[2].port, 3000);
        assert_eq!(records[2].pid, 5432);
        assert!(records.iter().all(|r| r.process_name == "unknown"));
    }

    #[test]
    fn test_short_and_header_lines_are_skipped() {
        let output = "Active Connections\n\
                      \n\
                      Proto  Local Address          Foreign Address        State           PID\n\
                      TCP    0.0.0.0:8080           0.0.0.0:0              LISTENING       77\n\
                      TCP    0.0.0.0:9090\n";
        let records = parse_netstat_output(output);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].port, 8080);
        assert_eq!(records[0].pid, 77);
    }

    #[test]
    fn test_output_sorted_and_unique() {
        let records = parse_netstat_output(SAMPLE);
        assert!(records.windows(2).all(|w| w[0].port <= w[1].port));
        let pairs: std::collections::HashSet<(u32, u16)> =
            records.iter().map(|r| (r.pid, r.port)).collect();
        assert_eq!(pairs.len(), records.len());
    }
}
