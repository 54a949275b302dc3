//! `plinth template-version`: print the bootstrap version a template declares.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use plinth_common::TemplateVersionOutput;

use crate::app::AppContext;
use crate::commands::load_template;
use crate::domain::extract_version;

#[derive(Args)]
pub struct TemplateVersionArgs {
    /// Template file (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub template: PathBuf,
}

/// Run the template-version command. Templates without a version marker
/// report 0.
///
/// # Errors
///
/// Returns an error if the template cannot be read or parsed.
pub fn run(app: &AppContext, args: &TemplateVersionArgs) -> Result<ExitCode> {
    let template = load_template(&args.template)?;
    let version = extract_version(&template);
    tracing::debug!(template = %args.template.display(), version, "extracted version");
    app.renderer()
        .render_template_version(&TemplateVersionOutput {
            template: args.template.display().to_string(),
            version,
        })?;
    Ok(ExitCode::SUCCESS)
}
