//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Version-gated provisioning of the deployment toolkit's bootstrap stack
#[derive(Parser)]
#[command(
    name = "plinth",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log debug details to stderr (repeat for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy or upgrade the bootstrap stack
    Bootstrap(commands::bootstrap::BootstrapArgs),

    /// Print the bootstrap version a template declares
    TemplateVersion(commands::template_version::TemplateVersionArgs),

    /// Show the deployed bootstrap stack and its version
    Status(commands::status::StatusArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
            ..
        } = self;
        let app = AppContext::new(&OutputFlags {
            no_color,
            quiet,
            json,
        });
        match command {
            Command::Bootstrap(args) => commands::bootstrap::run(&app, args).await,
            Command::TemplateVersion(args) => commands::template_version::run(&app, &args),
            Command::Status(args) => commands::status::run(&app, args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
