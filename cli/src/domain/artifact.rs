//! In-memory artifact bundle: the packaged form of a template handed to the
//! deployment engine.
//!
//! Mirrors the layout of a cloud assembly manifest: a schema version plus a
//! map of named artifacts. Nothing here touches the filesystem; the manifest
//! can be rendered as JSON for inspection.

use std::collections::BTreeMap;

use plinth_common::CLOUDFORMATION_STACK_ARTIFACT;
use serde::Serialize;

use crate::domain::environment::Environment;
use crate::domain::error::BootstrapError;
use crate::domain::template::Template;

/// Cloud assembly manifest schema version written into every bundle.
pub const MANIFEST_SCHEMA_VERSION: &str = "36.0.0";

/// Properties of a CloudFormation stack artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackProperties {
    /// File name the template would have inside an on-disk assembly.
    pub template_file: String,
    pub termination_protection: bool,
}

/// A single named, deployable stack.
#[derive(Debug, Clone, PartialEq)]
pub struct StackArtifact {
    pub logical_id: String,
    pub artifact_type: &'static str,
    /// Environment identity as given by the caller (`aws://account/region`).
    pub environment: String,
    pub properties: StackProperties,
    pub template: Template,
}

impl StackArtifact {
    /// Stack name this artifact deploys to. Equal to its logical ID.
    #[must_use]
    pub fn stack_name(&self) -> &str {
        &self.logical_id
    }
}

/// A packaged set of artifacts addressable by logical ID.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactBundle {
    artifacts: BTreeMap<String, StackArtifact>,
}

#[derive(Serialize)]
struct ManifestEntry<'a> {
    #[serde(rename = "type")]
    artifact_type: &'a str,
    environment: &'a str,
    properties: &'a StackProperties,
}

#[derive(Serialize)]
struct Manifest<'a> {
    version: &'a str,
    artifacts: BTreeMap<&'a str, ManifestEntry<'a>>,
}

impl ArtifactBundle {
    #[must_use]
    pub fn builder() -> BundleBuilder {
        BundleBuilder::default()
    }

    /// Take a stack artifact out of the bundle by its logical ID.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::MissingArtifact`] if no artifact has that ID.
    pub fn into_stack(mut self, name: &str) -> Result<StackArtifact, BootstrapError> {
        self.artifacts
            .remove(name)
            .ok_or_else(|| BootstrapError::MissingArtifact(name.to_string()))
    }

    /// Render the assembly manifest as JSON.
    #[must_use]
    pub fn manifest(&self) -> serde_json::Value {
        let manifest = Manifest {
            version: MANIFEST_SCHEMA_VERSION,
            artifacts: self
                .artifacts
                .iter()
                .map(|(id, a)| {
                    (
                        id.as_str(),
                        ManifestEntry {
                            artifact_type: a.artifact_type,
                            environment: &a.environment,
                            properties: &a.properties,
                        },
                    )
                })
                .collect(),
        };
        serde_json::to_value(manifest).unwrap_or_default()
    }
}

/// Accumulates artifacts before freezing them into an [`ArtifactBundle`].
#[derive(Debug, Default)]
pub struct BundleBuilder {
    artifacts: BTreeMap<String, StackArtifact>,
}

impl BundleBuilder {
    /// Add a CloudFormation stack artifact. A later artifact with the same
    /// logical ID replaces an earlier one.
    #[must_use]
    pub fn add_stack(
        mut self,
        logical_id: &str,
        environment: &Environment,
        template: Template,
        termination_protection: bool,
    ) -> Self {
        let artifact = StackArtifact {
            logical_id: logical_id.to_string(),
            artifact_type: CLOUDFORMATION_STACK_ARTIFACT,
            environment: environment.to_string(),
            properties: StackProperties {
                template_file: format!("{logical_id}.template.json"),
                termination_protection,
            },
            template,
        };
        self.artifacts.insert(logical_id.to_string(), artifact);
        self
    }

    #[must_use]
    pub fn build(self) -> ArtifactBundle {
        ArtifactBundle {
            artifacts: self.artifacts,
        }
    }
}

/// Package a bootstrap template as a single-stack bundle.
///
/// Termination protection defaults to disabled when unspecified.
#[must_use]
pub fn package_bootstrap_stack(
    stack_name: &str,
    environment: &Environment,
    template: Template,
    termination_protection: Option<bool>,
) -> ArtifactBundle {
    ArtifactBundle::builder()
        .add_stack(
            stack_name,
            environment,
            template,
            termination_protection.unwrap_or(false),
        )
        .build()
}
