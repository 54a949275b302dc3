//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Bootstrap errors ──────────────────────────────────────────────────────────

/// Errors raised by the bootstrap pipeline itself (not by its collaborators).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BootstrapError {
    #[error(
        "Not downgrading existing bootstrap stack '{stack_name}' from version '{deployed}' to version '{proposed}'. Use --force to force."
    )]
    DowngradeRejected {
        stack_name: String,
        deployed: u64,
        proposed: u64,
    },

    #[error("Artifact bundle has no stack named '{0}'.")]
    MissingArtifact(String),
}

impl BootstrapError {
    /// Machine-readable code used in `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DowngradeRejected { .. } => "DOWNGRADE_REJECTED",
            Self::MissingArtifact(_) => "MISSING_ARTIFACT",
        }
    }
}

// ── Environment errors ────────────────────────────────────────────────────────

/// Errors related to parsing environment identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Invalid environment '{0}': expected aws://<account>/<region>")]
    Invalid(String),

    #[error("Invalid account '{0}': expected a 12-digit account ID")]
    InvalidAccount(String),
}

// ── Template errors ───────────────────────────────────────────────────────────

/// Errors loading a template document from text.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template is neither valid JSON nor valid YAML: {0}")]
    Parse(String),

    #[error("Template must be a mapping at the top level, got {0}")]
    NotAMapping(&'static str),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
