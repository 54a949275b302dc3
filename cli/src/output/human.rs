//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;
use plinth_common::{BootstrapOutput, StackStatusOutput, TemplateVersionOutput, UpgradeDecision};

use crate::domain::PlinthConfig;
use crate::output::OutputContext;

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the outcome of `plinth bootstrap`.
    pub fn render_bootstrap(&self, out: &BootstrapOutput) {
        let target = out.decision.target();
        let version = target.style(self.ctx.styles.version);
        if out.no_op {
            self.ctx.success(&format!(
                "'{}' is already up to date at version {version} in {}",
                out.stack_name, out.environment
            ));
        } else if !out.executed {
            self.ctx.success(&format!(
                "Change set for '{}' (version {version}) created in {}, not executed",
                out.stack_name, out.environment
            ));
        } else {
            let verb = match out.decision {
                UpgradeDecision::InitialInstall { .. } => "installed",
                UpgradeDecision::Upgrade { .. } => "upgraded",
                UpgradeDecision::Reapply { .. } => "updated",
                UpgradeDecision::ForcedDowngrade { .. } => "downgraded",
            };
            self.ctx.success(&format!(
                "Bootstrap stack '{}' {verb} to version {version} in {}",
                out.stack_name, out.environment
            ));
        }
        if let Some(previous) = previous_version(&out.decision) {
            self.ctx.kv("Previous version:", &previous.to_string());
        }
        if let Some(arn) = &out.stack_arn {
            self.ctx.kv("Stack ARN:", arn);
        }
        if !out.outputs.is_empty() && !self.ctx.quiet {
            println!();
            self.ctx.header("Outputs:");
            for (key, value) in &out.outputs {
                self.ctx.kv(&format!("{key}:"), value);
            }
        }
    }

    /// Render the deployed bootstrap stack, or its absence.
    pub fn render_status(&self, out: &StackStatusOutput) {
        if !out.deployed {
            self.ctx.warn(&format!(
                "No bootstrap stack '{}' in {}",
                out.stack_name, out.environment
            ));
            return;
        }
        self.ctx.kv("Stack:", &out.stack_name);
        self.ctx.kv("Environment:", &out.environment);
        let version = out.version.map_or_else(
            || "-".to_string(),
            |v| v.style(self.ctx.styles.version).to_string(),
        );
        self.ctx.kv("Version:", &version);
        if let Some(status) = &out.stack_status {
            let styled = if status.ends_with("_COMPLETE") && !status.contains("ROLLBACK") {
                status.style(self.ctx.styles.success).to_string()
            } else {
                status.style(self.ctx.styles.warning).to_string()
            };
            self.ctx.kv("Status:", &styled);
        }
        if let Some(updated) = &out.last_updated {
            self.ctx.kv("Updated:", updated);
        }
    }

    /// Print the bare version number so it can be captured by scripts.
    #[allow(clippy::unused_self)]
    pub fn render_template_version(&self, out: &TemplateVersionOutput) {
        println!("{}", out.version);
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &PlinthConfig, path: &Path) {
        self.ctx
            .header(&format!("Configuration ({})", path.display()));
        self.ctx
            .kv("bootstrap.stack-name:", &config.bootstrap.stack_name);
        self.ctx.kv(
            "bootstrap.termination-protection:",
            &config.bootstrap.termination_protection.to_string(),
        );
        self.ctx
            .kv("aws.profile:", config.aws.profile.as_deref().unwrap_or("(none)"));
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        println!("plinth {}", version.style(self.ctx.styles.version));
    }
}

/// Deployed version being replaced, when the deploy moves to another one.
pub(crate) fn previous_version(decision: &UpgradeDecision) -> Option<u64> {
    decision.current().filter(|v| *v != decision.target())
}
