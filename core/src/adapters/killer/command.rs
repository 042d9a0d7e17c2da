//! Termination through the `kill` / `taskkill` utilities.

use tracing::{debug, warn};

use crate::domain::Platform;
use crate::error::{Error, Result};
use crate::ports::{CommandRunner, ProcessKillerPort};

use super::classify_failure;

/// Signals processes by running the platform's kill utility.
///
/// - POSIX: `kill -15 PID` (graceful) / `kill -9 PID` (forceful)
/// - Windows: `taskkill /PID PID` / `taskkill /F /PID PID`
pub struct CommandKiller<R: CommandRunner> {
    platform: Platform,
    runner: R,
}

impl<R: CommandRunner> CommandKiller<R> {
    pub fn new(platform: Platform, runner: R) -> Self {
        Self { platform, runner }
    }

    /// Program and arguments for one termination request.
    fn invocation(&self, pid: u32, forceful: bool) -> (&'static str, Vec<String>) {
        let pid = pid.to_string();
        match self.platform {
            Platform::Posix => {
                let signal = if forceful { "-9" } else { "-15" };
                ("kill", vec![signal.to_string(), pid])
            }
            Platform::Windows => {
                let mut args = Vec::with_capacity(3);
                if forceful {
                    args.push("/F".to_string());
                }
                args.push("/PID".to_string());
                args.push(pid);
                ("taskkill", args)
            }
        }
    }
}

impl<R: CommandRunner> ProcessKillerPort for CommandKiller<R> {
    async fn terminate(&self, pid: u32, forceful: bool) -> Result<()> {
        let (program, args) = self.invocation(pid, forceful);
        debug!(pid = pid, forceful = forceful, program = program, "Sending termination request");

        let output = self
            .runner
            .run(program, &args)
            .await
            .map_err(|e| Error::KillFailed {
                pid,
                reason: format!("failed to run {}: {}", program, e),
            })?;

        if output.success() {
            debug!(pid = pid, "Termination request delivered");
            return Ok(());
        }

        let err = classify_failure(pid, output.failure_text());
        if matches!(err, Error::PermissionDenied { .. }) {
            warn!(pid = pid, "Permission denied to kill process");
        }
        Err(err)
    }

    async fn is_running(&self, pid: u32) -> bool {
        let pid_text = pid.to_string();
        let (program, args) = match self.platform {
            Platform::Posix => ("kill", vec!["-0".to_string(), pid_text.clone()]),
            Platform::Windows => (
                "tasklist",
                vec![
                    "/FI".to_string(),
                    format!("PID eq {}", pid),
                    "/NH".to_string(),
                ],
            ),
        };

        match self.runner.run(program, &args).await {
            Ok(output) => match self.platform {
                // kill -0 fails with EPERM for live processes we do not own
                Platform::Posix => {
                    output.success()
                        || output.failure_text().to_lowercase().contains("not permitted")
                }
                Platform::Windows => output
                    .stdout
                    .split_whitespace()
                    .any(|field| field == pid_text),
            },
            Err(e) => {
                warn!(pid = pid, error = %e, "Failed to check if process is running");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CommandOutput;
    use parking_lot::Mutex;

    /// Runner that always answers with the same output and records argv.
    struct ScriptedRunner {
        output: CommandOutput,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedRunner {
        fn new(output: CommandOutput) -> Self {
            Self {
                output,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn last_call(&self) -> Vec<String> {
            self.calls.lock().last().cloned().unwrap_or_default()
        }
    }

    impl CommandRunner for ScriptedRunner {
        async fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
            let mut argv = vec![program.to_string()];
            argv.extend(args.iter().cloned());
            self.calls.lock().push(argv);
            Ok(self.output.clone())
        }
    }

    fn ok() -> CommandOutput {
        CommandOutput::exited(0, "", "")
    }

    #[tokio::test]
    async fn test_posix_signals() {
        let killer = CommandKiller::new(Platform::Posix, ScriptedRunner::new(ok()));

        killer.terminate(42, false).await.unwrap();
        assert_eq!(killer.runner.last_call(), vec!["kill", "-15", "42"]);

        killer.terminate(42, true).await.unwrap();
        assert_eq!(killer.runner.last_call(), vec!["kill", "-9", "42"]);
    }

    #[tokio::test]
    async fn test_windows_taskkill() {
        let killer = CommandKiller::new(Platform::Windows, ScriptedRunner::new(ok()));

        killer.terminate(5432, false).await.unwrap();
        assert_eq!(killer.runner.last_call(), vec!["taskkill", "/PID", "5432"]);

        killer.terminate(5432, true).await.unwrap();
        assert_eq!(
            killer.runner.last_call(),
            vec!["taskkill", "/F", "/PID", "5432"]
        );
    }

    #[tokio::test]
    async fn test_no_such_process() {
        let runner = ScriptedRunner::new(CommandOutput::exited(
            1,
            "",
            "kill: (42) - No such process",
        ));
        let killer = CommandKiller::new(Platform::Posix, runner);
        let err = killer.terminate(42, false).await.unwrap_err();
        assert!(matches!(err, Error::ProcessNotFound { pid: 42 }));
    }

    #[tokio::test]
    async fn test_taskkill_access_denied() {
        let runner = ScriptedRunner::new(CommandOutput::exited(
            1,
            "",
            "ERROR: The process with PID 4 could not be terminated.\r\nReason: Access is denied.",
        ));
        let killer = CommandKiller::new(Platform::Windows, runner);
        let err = killer.terminate(4, true).await.unwrap_err();
        assert!(matches!(err, Error::PermissionDenied { pid: 4 }));
    }

    #[tokio::test]
    async fn test_is_running_windows() {
        let runner = ScriptedRunner::new(CommandOutput::exited(
            0,
            "node.exe                      5432 Console                    1     45,000 K\r\n",
            "",
        ));
        let killer = CommandKiller::new(Platform::Windows, runner);
        assert!(killer.is_running(5432).await);
        assert!(!killer.is_running(543).await);
    }

    #[tokio::test]
    async fn test_is_running_posix() {
        let alive = CommandKiller::new(Platform::Posix, ScriptedRunner::new(ok()));
        assert!(alive.is_running(1).await);

        let gone = CommandKiller::new(
            Platform::Posix,
            ScriptedRunner::new(CommandOutput::exited(1, "", "kill: (9) - No such process")),
        );
        assert!(!gone.is_running(9).await);
    }
}
