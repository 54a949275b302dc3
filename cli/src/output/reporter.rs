//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Lets application services emit progress events without depending on any
//! presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"`
/// - `success()` prints `"  ✓ {message}"`
/// - `warn()` prints `"  ! {message}"`
///
/// Everything is suppressed in quiet mode and when `silent` is set (JSON
/// output owns stdout).
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    silent: bool,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx, silent: false }
    }

    /// A reporter that prints nothing.
    #[must_use]
    pub fn silent(ctx: &'a OutputContext) -> Self {
        Self { ctx, silent: true }
    }

    fn enabled(&self) -> bool {
        !self.silent && !self.ctx.quiet
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if self.enabled() {
            println!("  {} {message}", "→".style(self.ctx.styles.step));
        }
    }

    fn success(&self, message: &str) {
        if self.enabled() {
            println!("  {} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        if self.enabled() {
            println!("  {} {message}", "!".style(self.ctx.styles.warning));
        }
    }
}
