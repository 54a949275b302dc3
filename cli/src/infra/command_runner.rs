//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` spawns child processes with piped output, a hard
//! timeout and a guaranteed kill when the timeout fires.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::application::ports::CommandRunner;

/// Default timeout for short `aws` queries (identity, describe, configure).
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for `cloudformation deploy`, which waits for the stack to settle.
pub const DEPLOY_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Production `CommandRunner` backed by `tokio::process`.
///
/// `tokio::time::timeout` around `.output().await` drops the future but can
/// leave the OS process running, so the child is killed explicitly from a
/// `tokio::select!` branch instead.
pub struct TokioCommandRunner {
    timeout: Duration,
    envs: Vec<(String, String)>,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            envs: Vec::new(),
        }
    }

    /// Set an environment variable on every spawned child.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

async fn drain<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = h.read_to_end(&mut buf).await;
    }
    buf
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        tracing::debug!(program, ?args, timeout_secs = timeout.as_secs(), "spawning");
        let mut child = tokio::process::Command::new(program)
            .args(args)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        let stdout_handle = child.stdout.take();
        let stderr_handle = child.stderr.take();

        // Pipes are drained concurrently with wait() so a chatty child
        // cannot block on a full pipe buffer.
        tokio::select! {
            result = async {
                let (status, stdout, stderr) =
                    tokio::join!(child.wait(), drain(stdout_handle), drain(stderr_handle));
                Ok(Output {
                    status: status.with_context(|| format!("waiting for {program}"))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                anyhow::bail!("{program} timed out after {}s", timeout.as_secs())
            }
        }
    }
}
