//! Interactive confirmation.

use anyhow::Result;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Ask a yes/no question on stderr and read one line from stdin.
///
/// Anything other than `y` or `yes` (any case) declines, including EOF.
pub async fn confirm(question: &str) -> Result<bool> {
    let mut stderr = io::stderr();
    stderr
        .write_all(format!("{} [y/N] ", question).as_bytes())
        .await?;
    stderr.flush().await?;

    let mut line = String::new();
    BufReader::new(io::stdin()).read_line(&mut line).await?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
