// SPDX-License-Identifier: PMPL-1.0-or-later

//! Child processes with a hard kill deadline
//!
//! Engines get a soft timeout on their own command line. If one ignores it,
//! the process is killed once the hard deadline elapses and the call is
//! reported as timed out.

use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::warn;

/// Captured result of one engine invocation
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code (None if killed or terminated by a signal)
    pub exit_code: Option<i32>,
    /// Whether the hard deadline elapsed and the process was killed
    pub timed_out: bool,
    pub elapsed: Duration,
}

/// Run `cmd` to completion, killing it if `deadline` elapses first.
pub async fn run_with_deadline(mut cmd: Command, deadline: Option<Duration>) -> Result<ProcessOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let started = Instant::now();
    let child = cmd.spawn().context("Failed to spawn engine process")?;

    let Some(deadline) = deadline else {
        let output = child
            .wait_with_output()
            .await
            .context("Engine execution failed")?;
        return Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            timed_out: false,
            elapsed: started.elapsed(),
        });
    };

    let pid = child.id();

    // Dropping the wait future drops the child, and kill_on_drop reaps it.
    tokio::select! {
        output = child.wait_with_output() => {
            let output = output.context("Engine execution failed")?;
            Ok(ProcessOutput {
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                exit_code: output.status.code(),
                timed_out: false,
                elapsed: started.elapsed(),
            })
        }
        _ = tokio::time::sleep(deadline) => {
            warn!(
                "Engine process {:?} still running after {:?}, killing it",
                pid, deadline
            );
            Ok(ProcessOutput {
                stdout: String::new(),
                stderr: String::new(),
                exit_code: None,
                timed_out: true,
                elapsed: started.elapsed(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo hello world; exit 3");

        match run_with_deadline(cmd, Some(Duration::from_secs(5))).await {
            Ok(output) => {
                assert!(!output.timed_out);
                assert_eq!(output.stdout.lines().collect::<Vec<_>>(), vec!["hello world"]);
                assert_eq!(output.exit_code, Some(3));
            }
            Err(e) => eprintln!("Test skipped: {}", e),
        }
    }

    #[tokio::test]
    async fn test_deadline_kills_process() {
        let mut cmd = Command::new("sleep");
        cmd.arg("60");

        match run_with_deadline(cmd, Some(Duration::from_millis(200))).await {
            Ok(output) => {
                assert!(output.timed_out, "Process should have been killed");
                assert_eq!(output.exit_code, None);
                assert!(output.elapsed < Duration::from_secs(30));
            }
            Err(e) => eprintln!("Test skipped: {}", e),
        }
    }

    #[tokio::test]
    async fn test_missing_executable_is_an_error() {
        let cmd = Command::new("/nonexistent/engine-binary");
        assert!(run_with_deadline(cmd, None).await.is_err());
    }
}
