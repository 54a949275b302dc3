//! Deployment value types exchanged with the stack lookup and the deployment
//! engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use plinth_common::{DEFAULT_TOOLKIT_STACK_NAME, Tag};

use crate::domain::artifact::StackArtifact;
use crate::domain::environment::{ResolvedEnvironment, Session};
use crate::domain::version::BootstrapVersion;

/// Stack parameters. `None` keeps whatever value the deployed stack has.
pub type Parameters = BTreeMap<String, Option<String>>;

/// Snapshot of the bootstrap stack currently deployed in an environment.
///
/// Read once per deployment attempt and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedStack {
    pub stack_name: String,
    pub version: BootstrapVersion,
    pub stack_id: Option<String>,
    pub stack_status: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub outputs: BTreeMap<String, String>,
    pub parameters: BTreeMap<String, String>,
}

impl DeployedStack {
    /// Minimal snapshot carrying only a name and a version.
    #[must_use]
    pub fn new(stack_name: impl Into<String>, version: BootstrapVersion) -> Self {
        Self {
            stack_name: stack_name.into(),
            version,
            stack_id: None,
            stack_status: None,
            last_updated: None,
            outputs: BTreeMap::new(),
            parameters: BTreeMap::new(),
        }
    }
}

/// Caller-facing options of a bootstrap deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Stack to create or update.
    pub stack_name: String,
    /// Deploy even if the template is older than the deployed stack.
    pub force: bool,
    /// IAM role the engine assumes for the deployment.
    pub role_arn: Option<String>,
    pub tags: Vec<Tag>,
    /// `None` means disabled.
    pub termination_protection: Option<bool>,
    /// `false` stops after creating the change set.
    pub execute: bool,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_TOOLKIT_STACK_NAME.to_string(),
            force: false,
            role_arn: None,
            tags: Vec::new(),
            termination_protection: None,
            execute: true,
        }
    }
}

/// Everything the deployment engine needs for a single stack deployment.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    pub stack: StackArtifact,
    pub environment: ResolvedEnvironment,
    pub session: Session,
    pub parameters: Parameters,
    pub force: bool,
    pub role_arn: Option<String>,
    pub tags: Vec<Tag>,
    pub execute: bool,
}

/// Result reported by the deployment engine, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployStackResult {
    pub stack_name: String,
    pub stack_arn: Option<String>,
    /// The engine found nothing to change.
    pub no_op: bool,
    pub outputs: BTreeMap<String, String>,
}
