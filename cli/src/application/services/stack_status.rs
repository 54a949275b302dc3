//! Application service: read-only bootstrap stack status.

use anyhow::{Context, Result};

use crate::application::ports::{SdkProvider, StackLookup};
use crate::domain::{AccessMode, DeployedStack, Environment, ResolvedEnvironment};

/// What is currently deployed under a stack name.
#[derive(Debug, Clone)]
pub struct StackStatus {
    pub environment: ResolvedEnvironment,
    pub stack_name: String,
    /// `None` when no stack with that name exists.
    pub deployed: Option<DeployedStack>,
}

/// Report the bootstrap stack deployed in `environment`, if any.
///
/// # Errors
///
/// Propagates resolver, credential and lookup failures.
pub async fn stack_status(
    sdk: &impl SdkProvider,
    lookup: &impl StackLookup,
    environment: &Environment,
    stack_name: &str,
) -> Result<StackStatus> {
    let resolved = sdk
        .resolve_environment(environment)
        .await
        .with_context(|| format!("resolving environment {environment}"))?;
    let session = sdk
        .for_environment(&resolved, AccessMode::ForReading)
        .await
        .with_context(|| format!("acquiring credentials for {resolved}"))?;
    let deployed = lookup
        .lookup(&resolved, &session, stack_name)
        .await
        .with_context(|| format!("looking up stack '{stack_name}' in {resolved}"))?;
    tracing::debug!(stack = stack_name, found = deployed.is_some(), "stack status");
    Ok(StackStatus {
        environment: resolved,
        stack_name: stack_name.to_string(),
        deployed,
    })
}
