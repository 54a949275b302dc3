//! Domain types and validators for plinth configuration.
//!
//! Pure functions only; nothing here touches the filesystem.

use std::sync::LazyLock;

use anyhow::Result;
use plinth_common::DEFAULT_TOOLKIT_STACK_NAME;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "bootstrap.stack-name",
    "bootstrap.termination-protection",
    "aws.profile",
];

/// CloudFormation stack name rule.
static STACK_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z][A-Za-z0-9-]{0,127}$").expect("valid regex")
});

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.plinth/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PlinthConfig {
    pub bootstrap: BootstrapConfig,
    pub aws: AwsConfig,
}

/// Defaults for `plinth bootstrap`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct BootstrapConfig {
    /// Stack name used when `--stack-name` is not given.
    pub stack_name: String,
    /// Termination protection used when `--termination-protection` is not given.
    pub termination_protection: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_TOOLKIT_STACK_NAME.to_string(),
            termination_protection: false,
        }
    }
}

/// Credentials settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AwsConfig {
    /// Named profile passed to every `aws` invocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl PlinthConfig {
    /// Apply a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "bootstrap.stack-name" => self.bootstrap.stack_name = value.to_string(),
            "bootstrap.termination-protection" => {
                self.bootstrap.termination_protection = value == "true";
            }
            "aws.profile" => self.aws.profile = Some(value.to_string()),
            _ => unreachable!("key validated above"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let valid = match key {
        "bootstrap.stack-name" if !is_valid_stack_name(value) => {
            "1-128 characters, a letter followed by letters, digits or hyphens"
        }
        "bootstrap.termination-protection" if value != "true" && value != "false" => {
            "true, false"
        }
        "aws.profile" if value.trim().is_empty() => "a non-empty profile name",
        _ => return Ok(()),
    };
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    }
    .into())
}

/// Whether `name` is an acceptable CloudFormation stack name.
#[must_use]
pub fn is_valid_stack_name(name: &str) -> bool {
    STACK_NAME_RE.is_match(name)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
