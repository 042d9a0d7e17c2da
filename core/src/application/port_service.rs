//! Port lookup and kill orchestration service.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{
    filter_by_port, CleanupReport, KillResult, PortFailure, PortQuery, PortRange,
    PortRangeSummary, PortRecord, ZombieWatchList,
};
use crate::error::{Error, Result};
use crate::ports::{PortScannerPort, ProcessKillerPort};

/// Application service for port lookups and process termination.
///
/// Every call enumerates afresh; nothing is cached between calls. A process
/// may exit or a port may be reused between enumeration and termination;
/// that shows up as a per-target `ProcessNotFound` or a `NoProcessOnPort`.
pub struct PortService<S: PortScannerPort, K: ProcessKillerPort> {
    scanner: S,
    killer: K,
    zombies: ZombieWatchList,
}

impl<S: PortScannerPort, K: ProcessKillerPort> PortService<S, K> {
    /// Create a new service with the default zombie watch-list.
    pub fn new(scanner: S, killer: K) -> Self {
        Self {
            scanner,
            killer,
            zombies: ZombieWatchList::default(),
        }
    }

    /// Replace the zombie watch-list.
    pub fn with_zombie_watch_list(mut self, zombies: ZombieWatchList) -> Self {
        self.zombies = zombies;
        self
    }

    pub fn zombie_watch_list(&self) -> &ZombieWatchList {
        &self.zombies
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// All listening sockets, sorted by port.
    pub async fn list_active_ports(&self) -> Result<Vec<PortRecord>> {
        self.scanner.scan().await
    }

    /// Records listening on one port; empty when nothing listens there.
    pub async fn get_port_info(&self, port: impl Into<PortQuery>) -> Result<Vec<PortRecord>> {
        let query = port.into();
        let records = self.scanner.scan().await?;
        Ok(filter_by_port(&records, &query))
    }

    /// Usage summary of the closed interval `[start, end]`.
    ///
    /// Bounds are validated before anything is enumerated.
    pub async fn get_port_range(&self, start: &str, end: &str) -> Result<PortRangeSummary> {
        let range = PortRange::parse(start, end)?;
        self.summarize_range(range).await
    }

    /// Usage summary of an already validated range.
    pub async fn summarize_range(&self, range: PortRange) -> Result<PortRangeSummary> {
        let records = self.scanner.scan().await?;
        Ok(range.summarize(&records))
    }

    /// Listening processes whose names match the zombie watch-list.
    pub async fn identify_zombies(&self) -> Result<Vec<PortRecord>> {
        let records = self.scanner.scan().await?;
        Ok(self.zombies.filter(&records))
    }

    // =========================================================================
    // Termination
    // =========================================================================

    /// Terminate every process listening on `port`.
    ///
    /// Returns one result per process. Fails with `NoProcessOnPort` only when
    /// nothing listens on the port; individual failures are recorded.
    pub async fn kill_port(
        &self,
        port: impl Into<PortQuery>,
        forceful: bool,
    ) -> Result<Vec<KillResult>> {
        let targets = self.targets(port.into()).await?;

        let mut results = Vec::with_capacity(targets.len());
        for record in targets {
            let result = match self.killer.terminate(record.pid, forceful).await {
                Ok(()) => KillResult::succeeded(record),
                Err(e) => {
                    debug!(pid = record.pid, error = %e, "Termination failed");
                    KillResult::failed(record, e.to_string())
                }
            };
            results.push(result);
        }
        Ok(results)
    }

    /// Terminate every process on `port`, escalating to a forceful signal
    /// for processes still alive after `grace`.
    pub async fn kill_port_escalating(
        &self,
        port: impl Into<PortQuery>,
        grace: Duration,
    ) -> Result<Vec<KillResult>> {
        let targets = self.targets(port.into()).await?;

        let mut results = Vec::with_capacity(targets.len());
        for record in targets {
            let result = match self.escalate(record.pid, grace).await {
                Ok(()) => KillResult::succeeded(record),
                Err(e) => KillResult::failed(record, e.to_string()),
            };
            results.push(result);
        }
        Ok(results)
    }

    /// Terminate zombies, one `kill_port` pass per distinct matched port.
    pub async fn clean_zombies(&self, forceful: bool) -> Result<CleanupReport> {
        let zombies = self.identify_zombies().await?;
        Ok(self.kill_ports_of(&zombies, forceful).await)
    }

    /// Run `kill_port` once for each distinct port among `records`.
    ///
    /// Port-level failures are recorded in the report rather than returned.
    pub async fn kill_ports_of(&self, records: &[PortRecord], forceful: bool) -> CleanupReport {
        let ports: BTreeSet<u16> = records.iter().map(|r| r.port).collect();
        info!(count = records.len(), ports = ports.len(), "Killing processes by port");

        let mut report = CleanupReport::default();
        for port in ports {
            match self.kill_port(port, forceful).await {
                Ok(results) => report.results.extend(results),
                Err(e) => {
                    warn!(port = port, error = %e, "Could not clean port");
                    report.port_failures.push(PortFailure {
                        port,
                        error: e.to_string(),
                    });
                }
            }
        }
        report
    }

    async fn targets(&self, query: PortQuery) -> Result<Vec<PortRecord>> {
        let records = self.scanner.scan().await?;
        let targets = filter_by_port(&records, &query);
        if targets.is_empty() {
            return Err(Error::NoProcessOnPort {
                port: query.to_string(),
            });
        }
        Ok(targets)
    }

    async fn escalate(&self, pid: u32, grace: Duration) -> Result<()> {
        self.killer.terminate(pid, false).await?;

        if !grace.is_zero() {
            tokio::time::sleep(grace).await;
        }
        if !self.killer.is_running(pid).await {
            debug!(pid = pid, "Process exited after graceful request");
            return Ok(());
        }

        debug!(pid = pid, "Process still running, escalating to forceful kill");
        match self.killer.terminate(pid, true).await {
            // Exited between the probe and the signal
            Err(Error::ProcessNotFound { .. }) => Ok(()),
            other => other,
        }
    }
}
