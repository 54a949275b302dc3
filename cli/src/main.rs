//! plinth - version-gated provisioning of the deployment toolkit's bootstrap stack

use std::process::ExitCode;

use clap::Parser;
use plinth_cli::cli::Cli;
use plinth_cli::domain::BootstrapError;
use plinth_cli::output::json::format_error;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn error_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<BootstrapError>())
        .map_or("ERROR", BootstrapError::code)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    // Dropping the command future kills any running `aws` child.
    let result = tokio::select! {
        result = cli.run() => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted");
            return ExitCode::from(130);
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            if json {
                match format_error(&format!("{e:#}"), error_code(&e)) {
                    Ok(text) => println!("{text}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
