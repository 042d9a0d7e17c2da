//! Runtime settings.
//!
//! Settings are plain data: the library never reads or writes files. The CLI
//! deserializes them from an optional JSON file such as
//! `~/.portguard/config.json`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{ZombieWatchList, DEFAULT_ZOMBIE_NAMES};

/// Tunable behavior for enumeration, termination and the watch loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Process-name fragments treated as leftover dev servers.
    #[serde(default = "default_zombie_names")]
    pub zombie_names: Vec<String>,

    /// `lsof` locations, tried in order.
    #[serde(default = "default_lsof_paths")]
    pub lsof_paths: Vec<String>,

    /// Watch mode refresh interval in seconds.
    #[serde(default = "default_watch_interval")]
    pub watch_interval: u64,

    /// Wait between the graceful and forceful signal when escalating.
    #[serde(default = "default_escalation_grace_ms")]
    pub escalation_grace_ms: u64,
}

fn default_zombie_names() -> Vec<String> {
    DEFAULT_ZOMBIE_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_lsof_paths() -> Vec<String> {
    vec![
        "lsof".to_string(),           // In PATH
        "/usr/sbin/lsof".to_string(), // macOS default
        "/usr/bin/lsof".to_string(),  // Linux default
    ]
}

fn default_watch_interval() -> u64 {
    3
}

fn default_escalation_grace_ms() -> u64 {
    500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zombie_names: default_zombie_names(),
            lsof_paths: default_lsof_paths(),
            watch_interval: default_watch_interval(),
            escalation_grace_ms: default_escalation_grace_ms(),
        }
    }
}

impl Settings {
    /// Watch-list built from `zombie_names`.
    pub fn zombie_watch_list(&self) -> ZombieWatchList {
        ZombieWatchList::new(&self.zombie_names)
    }

    pub fn escalation_grace(&self) -> Duration {
        Duration::from_millis(self.escalation_grace_ms)
    }

    /// Watch interval, never shorter than one second.
    pub fn watch_period(&self) -> Duration {
        Duration::from_secs(self.watch_interval.max(1))
    }
}
