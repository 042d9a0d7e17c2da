//! Zombie (leftover dev server) detection by process name.

use serde::{Deserialize, Serialize};

use super::PortRecord;

/// Interpreter and runtime names treated as likely leftovers.
pub const DEFAULT_ZOMBIE_NAMES: [&str; 6] = ["node", "python", "python3", "ruby", "java", "deno"];

/// Case-insensitive substring watch-list over process names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZombieWatchList {
    names: Vec<String>,
}

impl ZombieWatchList {
    /// Build a watch-list from arbitrary names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether a record's process name contains any watched name.
    pub fn matches(&self, record: &PortRecord) -> bool {
        self.names.iter().any(|name| record.name_contains(name))
    }

    /// Keep only the records that look like zombies, preserving order.
    pub fn filter(&self, records: &[PortRecord]) -> Vec<PortRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

impl Default for ZombieWatchList {
    fn default() -> Self {
        Self::new(DEFAULT_ZOMBIE_NAMES)
    }
}
