//! Environment resolution and credential sessions via `aws sts`.

use anyhow::Result;
use serde::Deserialize;

use super::{AwsCli, ensure_success};
use crate::application::ports::{CommandRunner, EnvironmentResolver, SessionProvider};
use crate::domain::{AccessMode, Environment, ResolvedEnvironment, Session};
use crate::infra::command_runner::DEFAULT_CMD_TIMEOUT;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CallerIdentity {
    account: String,
    arn: String,
}

impl<R: CommandRunner> AwsCli<R> {
    async fn caller_identity(&self, region: Option<&str>) -> Result<CallerIdentity> {
        self.query(&["sts", "get-caller-identity"], region).await
    }

    async fn configured_region(&self) -> Result<String> {
        if let Some(region) = &self.default_region {
            return Ok(region.clone());
        }
        let output = self
            .invoke(&["configure", "get", "region"], None, DEFAULT_CMD_TIMEOUT)
            .await?;
        // `configure get` exits 1 when the key is unset.
        if output.status.success() {
            let region = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !region.is_empty() {
                return Ok(region);
            }
        } else if !output.stderr.is_empty() {
            ensure_success(&output, "aws configure get")?;
        }
        anyhow::bail!(
            "no default region configured; set AWS_REGION or pass aws://<account>/<region>"
        )
    }
}

impl<R: CommandRunner> EnvironmentResolver for AwsCli<R> {
    async fn resolve_environment(&self, env: &Environment) -> Result<ResolvedEnvironment> {
        let region = if env.has_unknown_region() {
            self.configured_region().await?
        } else {
            env.region.clone()
        };
        let account = if env.has_unknown_account() {
            self.caller_identity(Some(&region)).await?.account
        } else {
            env.account.clone()
        };
        let resolved = ResolvedEnvironment::new(account, region);
        tracing::debug!(logical = %env, resolved = %resolved, "environment resolved");
        Ok(resolved)
    }
}

impl<R: CommandRunner> SessionProvider for AwsCli<R> {
    async fn for_environment(&self, env: &ResolvedEnvironment, mode: AccessMode) -> Result<Session> {
        let identity = self.caller_identity(Some(&env.region)).await?;
        if identity.account != env.account {
            anyhow::bail!(
                "credentials belong to account {} ({}), not to {env}",
                identity.account,
                identity.arn
            );
        }
        tracing::debug!(env = %env, ?mode, caller = %identity.arn, "session acquired");
        Ok(Session {
            environment: env.clone(),
            mode,
            profile: self.profile.clone(),
            caller_arn: Some(identity.arn),
        })
    }
}
