//! Command handlers: one module per subcommand.

pub mod bootstrap;
pub mod config;
pub mod status;
pub mod template_version;
pub mod version;

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::config::is_valid_stack_name;
use crate::domain::{PlinthConfig, Template};

/// Read and parse a template file (JSON or YAML).
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a template document.
pub fn load_template(path: &Path) -> Result<Template> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read template {}", path.display()))?;
    Template::parse(&text).with_context(|| format!("cannot load template {}", path.display()))
}

/// Stack name from `--stack-name`, falling back to the configured one.
///
/// # Errors
///
/// Returns an error if the chosen name is not a valid stack name.
pub fn resolve_stack_name(arg: Option<String>, config: &PlinthConfig) -> Result<String> {
    let name = arg.unwrap_or_else(|| config.bootstrap.stack_name.clone());
    if !is_valid_stack_name(&name) {
        anyhow::bail!("Invalid stack name: {name}");
    }
    Ok(name)
}
