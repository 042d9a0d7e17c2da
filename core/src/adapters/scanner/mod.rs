//! Port enumeration adapters.
//!
//! Platform-specific tools are described as ordered [`ToolCandidate`]s, each
//! paired with the parser for its output. The [`PortEnumerator`] tries them
//! in order and returns the first structurally valid listing.

mod lsof;
mod netstat;
mod utils;

use std::io::ErrorKind;

use tracing::{debug, warn};

use crate::adapters::SystemCommandRunner;
use crate::config::Settings;
use crate::domain::{Platform, PortRecord};
use crate::error::{Error, Result};
use crate::ports::{CommandOutput, CommandRunner, PortScannerPort};

pub use lsof::parse_lsof_output;
pub use netstat::parse_netstat_output;

/// Exit status a shell reports for a command it could not find.
const SHELL_NOT_FOUND: i32 = 127;

/// Parser turning raw tool output into records.
pub type OutputParser = fn(&str) -> Vec<PortRecord>;

/// One way of invoking a diagnostic tool.
#[derive(Debug, Clone)]
pub struct ToolCandidate {
    /// Tool name reported when the binary is missing.
    pub tool: &'static str,
    /// Program to spawn: a bare name resolved via `PATH` or an absolute path.
    pub program: String,
    pub args: Vec<String>,
    /// Exit code the tool uses for "nothing matched". Treated as success
    /// only when stdout carries a listing or stderr is silent.
    pub no_match_code: Option<i32>,
    /// Keep only output lines containing this text before parsing.
    pub line_filter: Option<&'static str>,
    pub parse: OutputParser,
}

impl ToolCandidate {
    /// `lsof` listing TCP listeners with numeric hosts and ports.
    pub fn lsof(program: impl Into<String>) -> Self {
        Self {
            tool: "lsof",
            program: program.into(),
            args: ["-iTCP", "-sTCP:LISTEN", "-n", "-P"]
                .into_iter()
                .map(String::from)
                .collect(),
            no_match_code: Some(1),
            line_filter: None,
            parse: parse_lsof_output,
        }
    }

    /// `netstat -ano` reduced to listening TCP sockets.
    ///
    /// No `-p` filter: `-p TCP` drops TCPv6 rows.
    pub fn netstat() -> Self {
        Self {
            tool: "netstat",
            program: "netstat".to_string(),
            args: vec!["-ano".to_string()],
            no_match_code: None,
            line_filter: Some("LISTENING"),
            parse: parse_netstat_output,
        }
    }

    /// Ordered candidates for a platform.
    pub fn for_platform(platform: Platform, settings: &Settings) -> Vec<Self> {
        match platform {
            Platform::Posix => settings.lsof_paths.iter().map(Self::lsof).collect(),
            Platform::Windows => vec![Self::netstat()],
        }
    }

    /// Whether the output counts as a usable listing.
    fn accepts(&self, output: &CommandOutput) -> bool {
        if output.success() {
            return true;
        }
        // lsof exits 1 for real errors too
        output.code.is_some()
            && output.code == self.no_match_code
            && (!output.stdout.trim().is_empty() || output.stderr.trim().is_empty())
    }

    /// Apply the line filter and parser.
    fn parse_output(&self, stdout: &str) -> Vec<PortRecord> {
        match self.line_filter {
            Some(needle) => {
                let kept: Vec<&str> = stdout.lines().filter(|l| l.contains(needle)).collect();
                (self.parse)(&kept.join("\n"))
            }
            None => (self.parse)(stdout),
        }
    }
}

/// Why a single candidate could not produce a listing.
#[derive(Debug)]
enum Attempt {
    /// The binary does not exist at that location.
    Missing,
    /// The binary ran (or failed to spawn) for another reason.
    Failed(String),
}

/// Enumerates listening sockets by running the platform's diagnostic tool.
pub struct PortEnumerator<R: CommandRunner = SystemCommandRunner> {
    platform: Platform,
    runner: R,
    candidates: Vec<ToolCandidate>,
}

impl PortEnumerator<SystemCommandRunner> {
    /// Create an enumerator for the current platform with default settings.
    pub fn new() -> Self {
        Self::with_runner(
            Platform::current(),
            SystemCommandRunner::new(),
            &Settings::default(),
        )
    }
}

impl Default for PortEnumerator<SystemCommandRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> PortEnumerator<R> {
    /// Create an enumerator for an explicit platform and runner.
    pub fn with_runner(platform: Platform, runner: R, settings: &Settings) -> Self {
        Self {
            platform,
            runner,
            candidates: ToolCandidate::for_platform(platform, settings),
        }
    }

    /// Replace the candidate list.
    pub fn with_candidates(mut self, candidates: Vec<ToolCandidate>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn candidates(&self) -> &[ToolCandidate] {
        &self.candidates
    }

    /// List all listening TCP sockets, sorted by port.
    pub async fn list_active_ports(&self) -> Result<Vec<PortRecord>> {
        let mut last_failure: Option<String> = None;

        for candidate in &self.candidates {
            match self.attempt(candidate).await {
                Ok(records) => {
                    debug!(
                        program = %candidate.program,
                        count = records.len(),
                        "Enumerated listening ports"
                    );
                    return Ok(records);
                }
                Err(Attempt::Missing) => {
                    debug!(program = %candidate.program, "Tool not found, trying next candidate");
                }
                Err(Attempt::Failed(reason)) => {
                    debug!(program = %candidate.program, reason = %reason, "Tool failed, trying next candidate");
                    last_failure = Some(reason);
                }
            }
        }

        warn!(platform = %self.platform, "No diagnostic tool produced a listing");
        match last_failure {
            Some(reason) => Err(Error::Enumeration(reason)),
            None => Err(Error::ToolNotFound {
                tool: self.tool_name().to_string(),
            }),
        }
    }

    async fn attempt(&self, candidate: &ToolCandidate) -> std::result::Result<Vec<PortRecord>, Attempt> {
        let output = match self.runner.run(&candidate.program, &candidate.args).await {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(Attempt::Missing),
            Err(e) => {
                return Err(Attempt::Failed(format!(
                    "failed to run {}: {}",
                    candidate.program, e
                )))
            }
        };

        if candidate.accepts(&output) {
            return Ok(candidate.parse_output(&output.stdout));
        }
        if output.code == Some(SHELL_NOT_FOUND) {
            return Err(Attempt::Missing);
        }

        let text = output.failure_text();
        let code = output
            .code
            .map_or_else(|| "a signal".to_string(), |c| format!("status {}", c));
        Err(Attempt::Failed(if text.is_empty() {
            format!("{} exited with {}", candidate.program, code)
        } else {
            format!("{} exited with {}: {}", candidate.program, code, text)
        }))
    }

    fn tool_name(&self) -> &'static str {
        self.candidates
            .first()
            .map_or_else(|| self.platform.listing_tool(), |c| c.tool)
    }
}

impl<R: CommandRunner> PortScannerPort for PortEnumerator<R> {
    async fn scan(&self) -> Result<Vec<PortRecord>> {
        self.list_active_ports().await
    }
}
