use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Why the upgrade guard let a deployment through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpgradeDecision {
    /// No bootstrap stack existed yet.
    InitialInstall { to: u64 },
    /// The template is newer than the deployed stack.
    Upgrade { from: u64, to: u64 },
    /// The template carries the same version as the deployed stack.
    Reapply { version: u64 },
    /// The template is older, but the caller passed `--force`.
    ForcedDowngrade { from: u64, to: u64 },
}

impl UpgradeDecision {
    /// Version that will be deployed.
    #[must_use]
    pub fn target(&self) -> u64 {
        match *self {
            Self::InitialInstall { to }
            | Self::Upgrade { to, .. }
            | Self::ForcedDowngrade { to, .. } => to,
            Self::Reapply { version } => version,
        }
    }

    /// Version currently deployed, if any.
    #[must_use]
    pub fn current(&self) -> Option<u64> {
        match *self {
            Self::InitialInstall { .. } => None,
            Self::Upgrade { from, .. } | Self::ForcedDowngrade { from, .. } => Some(from),
            Self::Reapply { version } => Some(version),
        }
    }
}

/// JSON output for `plinth bootstrap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapOutput {
    pub stack_name: String,
    pub environment: String,
    pub decision: UpgradeDecision,
    /// `false` when the change set was created but not executed.
    pub executed: bool,
    /// `true` when the engine found nothing to change.
    pub no_op: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_arn: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, String>,
}

/// JSON output for `plinth status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackStatusOutput {
    pub stack_name: String,
    pub environment: String,
    pub deployed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    /// RFC 3339 timestamp of the last update (or creation).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// JSON output for `plinth template-version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVersionOutput {
    pub template: String,
    pub version: u64,
}
