//! Command runner backed by `tokio::process`.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::ports::{CommandOutput, CommandRunner};

/// Runs commands on the local machine and captures their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        debug!(program = program, args = ?args, "Running command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(program = program, code = ?result.code, "Command finished");
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_not_found() {
        let runner = SystemCommandRunner::new();
        let err = runner
            .run("/definitely/not/a/real/binary", &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_captures_stdout_and_code() {
        let runner = SystemCommandRunner::new();
        let output = runner
            .run("sh", &["-c".to_string(), "echo hello; exit 3".to_string()])
            .await
            .unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "hello");
    }
}
