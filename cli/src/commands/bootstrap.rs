//! `plinth bootstrap`: deploy or upgrade the bootstrap stack.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use plinth_common::{BootstrapOutput, Tag};

use crate::app::AppContext;
use crate::application::services::bootstrap::deploy_bootstrap_stack;
use crate::application::services::config_service;
use crate::commands::{load_template, resolve_stack_name};
use crate::domain::{BootstrapOptions, Environment, Parameters};
use crate::infra::aws::AwsCli;

#[derive(Args)]
pub struct BootstrapArgs {
    /// Target environment as aws://<account>/<region>; defaults to the
    /// account and region of the current credentials
    #[arg(value_name = "ENVIRONMENT")]
    pub environment: Option<Environment>,

    /// Bootstrap template (JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub template: PathBuf,

    /// Name of the bootstrap stack [default: from config, else CDKToolkit]
    #[arg(long)]
    pub stack_name: Option<String>,

    /// Deploy even if the template is older than the deployed stack
    #[arg(long)]
    pub force: bool,

    /// IAM role to assume for the deployment
    #[arg(long, value_name = "ARN")]
    pub role_arn: Option<String>,

    /// Tag to apply to the stack (repeatable)
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<Tag>,

    /// Stack parameter (repeatable); a bare KEY keeps the deployed value
    #[arg(long = "parameter", value_name = "KEY=VALUE", value_parser = parse_parameter)]
    pub parameters: Vec<(String, Option<String>)>,

    /// Enable termination protection on the stack
    #[arg(long)]
    pub termination_protection: bool,

    /// Create the change set but do not execute it
    #[arg(long)]
    pub no_execute: bool,

    /// Named AWS profile
    #[arg(long, env = "PLINTH_PROFILE")]
    pub profile: Option<String>,
}

/// Parse `KEY=VALUE` (or a bare `KEY`) into a parameter entry.
fn parse_parameter(s: &str) -> Result<(String, Option<String>), String> {
    let (key, value) = match s.split_once('=') {
        Some((k, v)) => (k.trim(), Some(v.to_string())),
        None => (s.trim(), None),
    };
    if key.is_empty() {
        return Err(format!("parameter '{s}' has an empty key"));
    }
    Ok((key.to_string(), value))
}

/// Run the bootstrap command.
///
/// # Errors
///
/// Returns an error if the template cannot be loaded, the upgrade guard
/// rejects the deployment, or any AWS call fails.
pub async fn run(app: &AppContext, args: BootstrapArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let template = load_template(&args.template)?;

    let stack_name = resolve_stack_name(args.stack_name, &config)?;
    let options = BootstrapOptions {
        stack_name,
        force: args.force,
        role_arn: args.role_arn,
        tags: args.tags,
        termination_protection: Some(
            args.termination_protection || config.bootstrap.termination_protection,
        ),
        execute: !args.no_execute,
    };
    let parameters: Parameters = args.parameters.into_iter().collect();
    let environment = args.environment.unwrap_or_default();

    let aws = AwsCli::from_env(args.profile.or(config.aws.profile));
    let reporter = app.reporter();
    let outcome = deploy_bootstrap_stack(
        &aws,
        &aws,
        &aws,
        &reporter,
        template,
        parameters,
        &environment,
        &options,
    )
    .await?;

    app.renderer().render_bootstrap(&BootstrapOutput {
        stack_name: outcome.result.stack_name,
        environment: outcome.environment.name(),
        decision: outcome.decision,
        executed: options.execute,
        no_op: outcome.result.no_op,
        stack_arn: outcome.result.stack_arn,
        outputs: outcome.result.outputs,
    })?;
    Ok(ExitCode::SUCCESS)
}
