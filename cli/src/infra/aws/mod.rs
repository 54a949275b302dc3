//! `aws` CLI adapters for the environment, session, lookup and deployment
//! ports.
//!
//! `AwsCli<R>` routes every call through a `CommandRunner`, always asks for
//! JSON output and appends `--profile` / `--region` where they apply. Tests
//! inject a scripted runner instead of spawning `aws`.

mod identity;
mod stacks;

use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::application::ports::CommandRunner;
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};

const AWS: &str = "aws";

/// Adapter over the `aws` command-line interface.
pub struct AwsCli<R: CommandRunner> {
    runner: R,
    profile: Option<String>,
    /// Region used when the environment leaves it unspecified and the
    /// profile configures none.
    default_region: Option<String>,
}

impl<R: CommandRunner> AwsCli<R> {
    #[must_use]
    pub fn new(runner: R, profile: Option<String>) -> Self {
        Self {
            runner,
            profile,
            default_region: None,
        }
    }

    #[must_use]
    pub fn with_default_region(mut self, region: Option<String>) -> Self {
        self.default_region = region;
        self
    }

    /// Run `aws <args> --output json [--profile P] [--region R]`.
    async fn invoke(&self, args: &[&str], region: Option<&str>, timeout: Duration) -> Result<Output> {
        let mut full: Vec<&str> = args.to_vec();
        full.extend(["--output", "json"]);
        if let Some(profile) = self.profile.as_deref() {
            full.extend(["--profile", profile]);
        }
        if let Some(region) = region {
            full.extend(["--region", region]);
        }
        self.runner.run_with_timeout(AWS, &full, timeout).await
    }

    /// Like [`Self::invoke`] but fails on a non-zero exit and decodes stdout.
    async fn query<T: DeserializeOwned>(
        &self,
        args: &[&str],
        region: Option<&str>,
    ) -> Result<T> {
        let what = describe(args);
        let output = self.invoke(args, region, DEFAULT_CMD_TIMEOUT).await?;
        ensure_success(&output, &what)?;
        serde_json::from_slice(&output.stdout)
            .with_context(|| format!("cannot parse output of {what}"))
    }
}

impl AwsCli<TokioCommandRunner> {
    /// Production adapter: real processes, no pager, default region taken
    /// from `AWS_REGION` / `AWS_DEFAULT_REGION`.
    #[must_use]
    pub fn from_env(profile: Option<String>) -> Self {
        let runner = TokioCommandRunner::new(DEFAULT_CMD_TIMEOUT).with_env("AWS_PAGER", "");
        let region = std::env::var("AWS_REGION")
            .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
            .ok()
            .filter(|r| !r.is_empty());
        Self::new(runner, profile).with_default_region(region)
    }
}

/// `aws sts get-caller-identity` style label for error messages.
fn describe(args: &[&str]) -> String {
    let sub: Vec<&str> = args.iter().take(2).copied().collect();
    format!("aws {}", sub.join(" "))
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

fn ensure_success(output: &Output, what: &str) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = stderr_text(output);
    if stderr.is_empty() {
        anyhow::bail!("{what} failed with {}", output.status);
    }
    anyhow::bail!("{what} failed: {stderr}")
}
