//! Stack lookup and deployment via `aws cloudformation`.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use plinth_common::{BOOTSTRAP_VERSION_OUTPUT, Tag};
use serde::Deserialize;
use serde_json::Value;

use super::{AwsCli, ensure_success, stderr_text};
use crate::application::ports::{CommandRunner, DeploymentEngine, StackLookup};
use crate::domain::version::parse_version_str;
use crate::domain::{
    DeployStackResult, DeployedStack, DeploymentRequest, ResolvedEnvironment, Session, Template,
};
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, DEPLOY_TIMEOUT};

/// Status of a stack whose change set was created but never executed.
const REVIEW_IN_PROGRESS: &str = "REVIEW_IN_PROGRESS";

const CAPABILITIES: [&str; 3] = [
    "CAPABILITY_IAM",
    "CAPABILITY_NAMED_IAM",
    "CAPABILITY_AUTO_EXPAND",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeStacks {
    #[serde(default)]
    stacks: Vec<StackDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StackDescription {
    stack_id: Option<String>,
    stack_name: String,
    stack_status: String,
    creation_time: Option<DateTime<Utc>>,
    last_updated_time: Option<DateTime<Utc>>,
    #[serde(default)]
    outputs: Vec<StackOutput>,
    #[serde(default)]
    parameters: Vec<StackParameter>,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    enable_termination_protection: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StackOutput {
    output_key: String,
    #[serde(default)]
    output_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StackParameter {
    parameter_key: String,
    #[serde(default)]
    parameter_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetTemplate {
    template_body: Value,
}

impl StackDescription {
    fn outputs(&self) -> BTreeMap<String, String> {
        self.outputs
            .iter()
            .map(|o| (o.output_key.clone(), o.output_value.clone()))
            .collect()
    }

    fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.parameter_key == key)
            .map(|p| p.parameter_value.as_str())
    }

    /// A stable state whose template can be compared against a new one.
    fn is_settled(&self) -> bool {
        self.stack_status.ends_with("_COMPLETE")
            && self.stack_status != "ROLLBACK_COMPLETE"
            && self.stack_status != "DELETE_COMPLETE"
    }

    fn into_deployed(self) -> DeployedStack {
        let outputs = self.outputs();
        let version = outputs
            .get(BOOTSTRAP_VERSION_OUTPUT)
            .and_then(|v| parse_version_str(v))
            .unwrap_or(0);
        DeployedStack {
            stack_name: self.stack_name,
            version,
            stack_id: self.stack_id,
            stack_status: Some(self.stack_status),
            last_updated: self.last_updated_time.or(self.creation_time),
            outputs,
            parameters: self
                .parameters
                .into_iter()
                .map(|p| (p.parameter_key, p.parameter_value))
                .collect(),
        }
    }
}

impl<R: CommandRunner> AwsCli<R> {
    /// `None` when CloudFormation reports that the stack does not exist.
    async fn describe_stack(&self, name: &str, region: &str) -> Result<Option<StackDescription>> {
        let output = self
            .invoke(
                &["cloudformation", "describe-stacks", "--stack-name", name],
                Some(region),
                DEFAULT_CMD_TIMEOUT,
            )
            .await?;
        if !output.status.success() && stderr_text(&output).contains("does not exist") {
            return Ok(None);
        }
        ensure_success(&output, "aws cloudformation describe-stacks")?;
        let parsed: DescribeStacks = serde_json::from_slice(&output.stdout)
            .context("cannot parse output of aws cloudformation describe-stacks")?;
        Ok(parsed.stacks.into_iter().next())
    }

    async fn current_template(&self, name: &str, region: &str) -> Result<Template> {
        let body: GetTemplate = self
            .query(
                &[
                    "cloudformation",
                    "get-template",
                    "--stack-name",
                    name,
                    "--template-stage",
                    "Original",
                ],
                Some(region),
            )
            .await?;
        match body.template_body {
            // YAML templates come back as a string.
            Value::String(text) => Ok(Template::parse(&text)?),
            document => Ok(Template::new(document)),
        }
    }

    /// Returns a no-op result when the deployed stack already matches the
    /// request.
    async fn unchanged(&self, request: &DeploymentRequest) -> Result<Option<DeployStackResult>> {
        let stack = &request.stack;
        let region = request.environment.region.as_str();
        let Some(current) = self.describe_stack(stack.stack_name(), region).await? else {
            return Ok(None);
        };
        if !current.is_settled()
            || current.enable_termination_protection != stack.properties.termination_protection
        {
            return Ok(None);
        }
        let params_differ = request.parameters.iter().any(|(key, value)| {
            value
                .as_deref()
                .is_some_and(|v| current.parameter(key) != Some(v))
        });
        let tags_differ = request.tags.iter().any(|t| !current.tags.contains(t));
        if params_differ || tags_differ {
            return Ok(None);
        }
        // An unreadable deployed template only means we cannot prove the
        // stack is unchanged.
        let deployed = match self.current_template(stack.stack_name(), region).await {
            Ok(template) => template,
            Err(e) => {
                tracing::debug!(
                    stack = stack.stack_name(),
                    error = %format!("{e:#}"),
                    "cannot compare deployed template, deploying"
                );
                return Ok(None);
            }
        };
        if deployed.fingerprint() != stack.template.fingerprint() {
            return Ok(None);
        }
        Ok(Some(DeployStackResult {
            stack_name: current.stack_name.clone(),
            stack_arn: current.stack_id.clone(),
            no_op: true,
            outputs: current.outputs(),
        }))
    }

    async fn set_termination_protection(&self, name: &str, region: &str, enabled: bool) -> Result<()> {
        let flag = if enabled {
            "--enable-termination-protection"
        } else {
            "--no-enable-termination-protection"
        };
        let output = self
            .invoke(
                &[
                    "cloudformation",
                    "update-termination-protection",
                    "--stack-name",
                    name,
                    flag,
                ],
                Some(region),
                DEFAULT_CMD_TIMEOUT,
            )
            .await?;
        ensure_success(&output, "aws cloudformation update-termination-protection")
    }
}

/// Arguments for `aws cloudformation deploy`, minus the global options.
fn deploy_args(request: &DeploymentRequest, template_path: &str) -> Vec<String> {
    let mut args: Vec<String> = [
        "cloudformation",
        "deploy",
        "--stack-name",
        request.stack.stack_name(),
        "--template-file",
        template_path,
        "--no-fail-on-empty-changeset",
        "--capabilities",
    ]
    .iter()
    .chain(CAPABILITIES.iter())
    .map(ToString::to_string)
    .collect();

    let overrides: Vec<String> = request
        .parameters
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}={v}")))
        .collect();
    if !overrides.is_empty() {
        args.push("--parameter-overrides".to_string());
        args.extend(overrides);
    }
    if !request.tags.is_empty() {
        args.push("--tags".to_string());
        args.extend(request.tags.iter().map(ToString::to_string));
    }
    if let Some(role) = &request.role_arn {
        args.push("--role-arn".to_string());
        args.push(role.clone());
    }
    if !request.execute {
        args.push("--no-execute-changeset".to_string());
    }
    args
}

impl<R: CommandRunner> StackLookup for AwsCli<R> {
    async fn lookup(
        &self,
        env: &ResolvedEnvironment,
        session: &Session,
        stack_name: &str,
    ) -> Result<Option<DeployedStack>> {
        tracing::debug!(stack = stack_name, env = %env, caller = ?session.caller_arn, "describe-stacks");
        let found = self
            .describe_stack(stack_name, &env.region)
            .await?
            .filter(|s| s.stack_status != REVIEW_IN_PROGRESS)
            .map(StackDescription::into_deployed);
        if let Some(stack) = &found {
            tracing::debug!(stack = stack_name, version = stack.version, status = ?stack.stack_status, "found deployed stack");
        }
        Ok(found)
    }
}

impl<R: CommandRunner> DeploymentEngine for AwsCli<R> {
    async fn deploy_stack(&self, request: DeploymentRequest) -> Result<DeployStackResult> {
        let name = request.stack.stack_name();
        let region = request.environment.region.as_str();

        let unchanged = if request.force {
            None
        } else {
            self.unchanged(&request).await?
        };
        if let Some(result) = unchanged {
            tracing::info!(stack = name, "deployed stack already up to date, skipping");
            return Ok(result);
        }

        let dir = tempfile::tempdir().context("cannot create temporary directory")?;
        let path = dir.path().join(&request.stack.properties.template_file);
        std::fs::write(&path, request.stack.template.to_json_pretty())
            .with_context(|| format!("cannot write {}", path.display()))?;
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("temporary path {} is not UTF-8", path.display()))?;

        let args = deploy_args(&request, path_str);
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self.invoke(&argv, Some(region), DEPLOY_TIMEOUT).await?;
        ensure_success(&output, "aws cloudformation deploy")?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let no_op = stdout.contains("No changes to deploy");

        if request.execute {
            self.set_termination_protection(
                name,
                region,
                request.stack.properties.termination_protection,
            )
            .await?;
        }

        let described = self.describe_stack(name, region).await?;
        Ok(DeployStackResult {
            stack_name: name.to_string(),
            stack_arn: described.as_ref().and_then(|d| d.stack_id.clone()),
            no_op,
            outputs: described.map(|d| d.outputs()).unwrap_or_default(),
        })
    }
}
