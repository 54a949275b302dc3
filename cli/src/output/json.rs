//! JSON output: the `--json` renderer and the error-object formatter.

use std::path::Path;

use anyhow::{Context, Result};
use plinth_common::{BootstrapOutput, StackStatusOutput, TemplateVersionOutput};
use serde::Serialize;

use crate::domain::PlinthConfig;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders command results as pretty-printed JSON on stdout.
pub struct JsonRenderer;

#[allow(clippy::unused_self)]
impl JsonRenderer {
    fn print<T: Serialize + ?Sized>(value: &T) -> Result<()> {
        let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{text}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_bootstrap(&self, out: &BootstrapOutput) -> Result<()> {
        Self::print(out)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(&self, out: &StackStatusOutput) -> Result<()> {
        Self::print(out)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_template_version(&self, out: &TemplateVersionOutput) -> Result<()> {
        Self::print(out)
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &PlinthConfig, path: &Path) -> Result<()> {
        Self::print(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }
}
