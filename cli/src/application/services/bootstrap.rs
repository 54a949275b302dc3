//! Application service: bootstrap stack deployment use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! The pipeline is strictly sequential:
//! resolve environment → acquire session → extract version → look up the
//! deployed stack → upgrade guard → package → dispatch. Nothing is packaged
//! or sent to the engine unless the guard passes.

use anyhow::{Context, Result};
use plinth_common::UpgradeDecision;

use crate::application::ports::{DeploymentEngine, ProgressReporter, SdkProvider, StackLookup};
use crate::domain::{
    AccessMode, BootstrapOptions, DeployStackResult, DeploymentRequest, Environment, Parameters,
    ResolvedEnvironment, Template, check_upgrade, extract_version, package_bootstrap_stack,
};

/// Outcome of [`deploy_bootstrap_stack`].
#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    /// Why the upgrade guard let the deployment through.
    pub decision: UpgradeDecision,
    /// Environment the stack was deployed to.
    pub environment: ResolvedEnvironment,
    /// Engine result, exactly as the engine returned it.
    pub result: DeployStackResult,
}

/// Deploy (or upgrade) the bootstrap stack described by `template`.
///
/// # Errors
///
/// Returns [`crate::domain::BootstrapError::DowngradeRejected`] when the
/// template is older than the deployed stack and `options.force` is unset.
/// Errors from the SDK provider, the stack lookup and the deployment engine
/// are propagated without retry.
#[allow(clippy::too_many_arguments)]
pub async fn deploy_bootstrap_stack(
    sdk: &impl SdkProvider,
    lookup: &impl StackLookup,
    engine: &impl DeploymentEngine,
    reporter: &impl ProgressReporter,
    template: Template,
    parameters: Parameters,
    environment: &Environment,
    options: &BootstrapOptions,
) -> Result<BootstrapOutcome> {
    let stack_name = options.stack_name.as_str();

    reporter.step(&format!("resolving environment {environment}..."));
    let resolved = sdk
        .resolve_environment(environment)
        .await
        .with_context(|| format!("resolving environment {environment}"))?;
    let session = sdk
        .for_environment(&resolved, AccessMode::ForWriting)
        .await
        .with_context(|| format!("acquiring credentials for {resolved}"))?;

    let proposed = extract_version(&template);
    tracing::debug!(stack = stack_name, proposed, env = %resolved, "extracted template version");

    reporter.step(&format!("checking existing bootstrap stack '{stack_name}'..."));
    let deployed = lookup
        .lookup(&resolved, &session, stack_name)
        .await
        .with_context(|| format!("looking up stack '{stack_name}' in {resolved}"))?;

    let decision = check_upgrade(proposed, deployed.as_ref(), options.force)?;
    tracing::info!(stack = stack_name, ?decision, "upgrade guard passed");
    report_decision(reporter, stack_name, decision);

    let bundle = package_bootstrap_stack(
        stack_name,
        environment,
        template,
        options.termination_protection,
    );
    tracing::debug!(manifest = %bundle.manifest(), "packaged bootstrap stack");
    let stack = bundle.into_stack(stack_name)?;

    let session = sdk
        .for_environment(&resolved, AccessMode::ForWriting)
        .await
        .with_context(|| format!("acquiring credentials for {resolved}"))?;

    reporter.step(&format!("deploying '{stack_name}' to {resolved}..."));
    let request = DeploymentRequest {
        stack,
        environment: resolved.clone(),
        session,
        parameters,
        force: options.force,
        role_arn: options.role_arn.clone(),
        tags: options.tags.clone(),
        execute: options.execute,
    };
    let result = engine
        .deploy_stack(request)
        .await
        .with_context(|| format!("deploying stack '{stack_name}' to {resolved}"))?;

    tracing::info!(stack = stack_name, no_op = result.no_op, "deployment finished");
    Ok(BootstrapOutcome {
        decision,
        environment: resolved,
        result,
    })
}

fn report_decision(reporter: &impl ProgressReporter, stack_name: &str, decision: UpgradeDecision) {
    match decision {
        UpgradeDecision::InitialInstall { to } => {
            reporter.step(&format!("no '{stack_name}' stack yet, installing version {to}"));
        }
        UpgradeDecision::Upgrade { from, to } => {
            reporter.step(&format!("upgrading '{stack_name}' from version {from} to {to}"));
        }
        UpgradeDecision::Reapply { version } => {
            reporter.step(&format!("'{stack_name}' already at version {version}, re-applying"));
        }
        UpgradeDecision::ForcedDowngrade { from, to } => {
            reporter.warn(&format!(
                "forcing downgrade of '{stack_name}' from version {from} to {to}"
            ));
        }
    }
}
