//! `plinth status`: show the deployed bootstrap stack.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use plinth_common::StackStatusOutput;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::stack_status::stack_status;
use crate::commands::resolve_stack_name;
use crate::domain::Environment;
use crate::infra::aws::AwsCli;
use crate::output::progress;

#[derive(Args)]
pub struct StatusArgs {
    /// Environment as aws://<account>/<region>; defaults to the current
    /// credentials
    #[arg(value_name = "ENVIRONMENT")]
    pub environment: Option<Environment>,

    /// Name of the bootstrap stack [default: from config, else CDKToolkit]
    #[arg(long)]
    pub stack_name: Option<String>,

    /// Named AWS profile
    #[arg(long, env = "PLINTH_PROFILE")]
    pub profile: Option<String>,
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if the stack name is invalid, the environment cannot be
/// resolved, or the lookup fails.
pub async fn run(app: &AppContext, args: StatusArgs) -> Result<ExitCode> {
    let config = config_service::load_config(&app.config_store)?;
    let stack_name = resolve_stack_name(args.stack_name, &config)?;
    let environment = args.environment.unwrap_or_default();
    let aws = AwsCli::from_env(args.profile.or(config.aws.profile));

    let status = progress::while_spinning(
        app.show_progress(),
        &format!("Looking up '{stack_name}'..."),
        "lookup failed",
        stack_status(&aws, &aws, &environment, &stack_name),
    )
    .await?;

    let deployed = status.deployed.as_ref();
    app.renderer().render_status(&StackStatusOutput {
        stack_name: status.stack_name.clone(),
        environment: status.environment.name(),
        deployed: deployed.is_some(),
        version: deployed.map(|s| s.version),
        stack_status: deployed.and_then(|s| s.stack_status.clone()),
        stack_id: deployed.and_then(|s| s.stack_id.clone()),
        last_updated: deployed.and_then(|s| s.last_updated).map(|t| t.to_rfc3339()),
    })?;
    Ok(ExitCode::SUCCESS)
}
