//! Per-invocation context shared by every command handler.

use crate::infra::config::YamlConfigStore;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Where results go: the terminal or a JSON document on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Global output flags from the command line.
pub struct OutputFlags {
    pub no_color: bool,
    pub quiet: bool,
    pub json: bool,
}

/// Built once in `Cli::run()` and borrowed by the command handlers.
pub struct AppContext {
    pub output: OutputContext,
    pub mode: OutputMode,
    /// `~/.plinth/config.yaml`, or the file named by `PLINTH_CONFIG`.
    pub config_store: YamlConfigStore,
}

impl AppContext {
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode: if flags.json {
                OutputMode::Json
            } else {
                OutputMode::Human
            },
            config_store: YamlConfigStore::new(),
        }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Reporter handed to application services. In JSON mode stdout carries
    /// only the result document, so progress is dropped.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        match self.mode {
            OutputMode::Human => TerminalReporter::new(&self.output),
            OutputMode::Json => TerminalReporter::silent(&self.output),
        }
    }

    /// Spinners draw over stdout, so they are off for JSON, quiet and
    /// non-TTY runs.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.is_json() && self.output.show_progress()
    }
}
