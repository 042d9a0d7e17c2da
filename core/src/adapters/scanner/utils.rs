use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::PortRecord;

static TRAILING_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\d+)$").expect("trailing port pattern is valid"));

pub struct Utils;

impl Utils {
    /// Extract the port from an address ending in `:<digits>`.
    ///
    /// Handles `*:8080`, `127.0.0.1:3000`, `[::1]:3000` and
    /// `0.0.0.0:135`. Ports outside 1-65535 yield `None`.
    pub fn trailing_port(address: &str) -> Option<u16> {
        let caps = TRAILING_PORT.captures(address)?;
        match caps[1].parse::<u16>() {
            Ok(0) | Err(_) => None,
            Ok(port) => Some(port),
        }
    }

    /// Parse a positive process ID.
    pub fn pid(field: &str) -> Option<u32> {
        match field.parse::<u32>() {
            Ok(0) | Err(_) => None,
            Ok(pid) => Some(pid),
        }
    }

    /// Drop repeated (pid, port) pairs, keeping the first, then sort by port.
    ///
    /// The sort is stable so records on the same port keep discovery order.
    pub fn dedup_and_sort(records: Vec<PortRecord>) -> Vec<PortRecord> {
        let mut seen: HashSet<(u32, u16)> = HashSet::new();
        let mut unique: Vec<PortRecord> = records
            .into_iter()
            .filter(|r| seen.insert((r.pid, r.port)))
            .collect();
        unique.sort_by_key(|r| r.port);
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_port_ipv4() {
        assert_eq!(Utils::trailing_port("127.0.0.1:3000"), Some(3000));
        assert_eq!(Utils::trailing_port("*:8080"), Some(8080));
    }

    #[test]
    fn test_trailing_port_ipv6() {
        assert_eq!(Utils::trailing_port("[::1]:3000"), Some(3000));
        assert_eq!(Utils::trailing_port("[fe80::1%lo0]:8080"), Some(8080));
    }

    #[test]
    fn test_trailing_port_rejects() {
        assert_eq!(Utils::trailing_port("(LISTEN)"), None);
        assert_eq!(Utils::trailing_port("*:http"), None);
        assert_eq!(Utils::trailing_port("*:70000"), None);
        assert_eq!(Utils::trailing_port("0.0.0.0:0"), None);
    }

    #[test]
    fn test_pid() {
        assert_eq!(Utils::pid("1234"), Some(1234));
        assert_eq!(Utils::pid("0"), None);
        assert_eq!(Utils::pid("-1"), None);
        assert_eq!(Utils::pid("abc"), None);
    }

    #[test]
    fn test_dedup_and_sort_is_stable() {
        let records = vec![
            PortRecord::new(8080, 7, "b", "*:8080"),
            PortRecord::new(3000, 2, "first", "*:3000"),
            PortRecord::new(3000, 1, "second", "[::]:3000"),
            PortRecord::new(3000, 2, "dup", "[::1]:3000"),
        ];
        let result = Utils::dedup_and_sort(records);
        let names: Vec<&str> = result.iter().map(|r| r.process_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "b"]);
    }
}
