//! Parser for `lsof -iTCP -sTCP:LISTEN -n -P` output (macOS, Linux, BSD).

use tracing::debug;

use crate::domain::PortRecord;

use super::utils::Utils;

/// Minimum whitespace-separated fields in a socket line.
const MIN_FIELDS: usize = 9;

/// Parse lsof output into records.
///
/// The first line is the column header. Columns used: COMMAND (0), PID (1)
/// and NAME (8). Lines that are too short, or whose NAME has no trailing
/// port, are skipped.
pub fn parse_lsof_output(output: &str) -> Vec<PortRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in output.trim().lines().skip(1) {
        let components: Vec<&str> = line.split_whitespace().collect();
        if components.len() < MIN_FIELDS {
            skipped += 1;
            continue;
        }

        let address = components[8];
        let (Some(pid), Some(port)) = (Utils::pid(components[1]), Utils::trailing_port(address))
        else {
            skipped += 1;
            continue;
        };

        records.push(PortRecord::new(port, pid, components[0], address));
    }

    if skipped > 0 {
        debug!(skipped = skipped, "Skipped unparsable lsof lines");
    }
    Utils::dedup_and_sort(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"COMMAND     PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
node      34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
nginx         1  root    6u  IPv4 0x1234567890abcdef      0t0  TCP *:80 (LISTEN)
node      34805  code   20u  IPv4 0x3d8015e195af1f40      0t0  TCP 127.0.0.1:3000 (LISTEN)
python3   41200  code    3u  IPv4 0x3d8015e195af1f41      0t0  TCP *:8000 (LISTEN)
"#;

    #[test]
    fn test_parse_lsof_output() {
        let records = parse_lsof_output(SAMPLE);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].port, 80);
        assert_eq!(records[0].process_name, "nginx");
        assert_eq!(records[0].address, "*:80");
        assert_eq!(records[1].port, 3000);
        assert_eq!(records[1].pid, 34805);
        assert_eq!(records[1].address, "[::1]:3000");
        assert_eq!(records[2].port, 8000);
    }

    #[test]
    fn test_short_line_does_not_affect_neighbours() {
        let output = "COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME\n\
                      node 10 me 19u IPv4 0x1 0t0 TCP *:3000 (LISTEN)\n\
                      truncated 11 me\n\
                      ruby 12 me 7u IPv4 0x2 0t0 TCP *:4567 (LISTEN)\n";
        let records = parse_lsof_output(output);
        let ports: Vec<u16> = records.iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![3000, 4567]);
    }

    #[test]
    fn test_address_without_port_is_skipped() {
        let output = "COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME\n\
                      launchd 1 root 9u IPv4 0x1 0t0 TCP *:afpovertcp (LISTEN)\n";
        assert!(parse_lsof_output(output).is_empty());
    }

    #[test]
    fn test_header_only_and_empty() {
        assert!(parse_lsof_output("COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME\n").is_empty());
        assert!(parse_lsof_output("").is_empty());
    }

    #[test]
    fn test_output_sorted_and_unique() {
        let records = parse_lsof_output(SAMPLE);
        assert!(records.windows(2).all(|w| w[0].port <= w[1].port));
        let mut keys: Vec<(u32, u16)> = records.iter().map(|r| (r.pid, r.port)).collect();
        keys.dedup();
        assert_eq!(keys.len(), records.len());
    }
}
