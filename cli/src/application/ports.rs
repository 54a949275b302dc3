//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::process::Output;

use anyhow::Result;

use crate::domain::{
    AccessMode, DeployStackResult, DeployedStack, DeploymentRequest, Environment, PlinthConfig,
    ResolvedEnvironment, Session,
};

// ── Environment and Credentials Ports ─────────────────────────────────────────

/// Maps a logical environment (which may carry placeholders) to a concrete
/// account and region.
#[allow(async_fn_in_trait)]
pub trait EnvironmentResolver {
    /// Resolve `env` to a concrete account and region.
    ///
    /// # Errors
    ///
    /// Returns an error if the account or region cannot be determined.
    async fn resolve_environment(&self, env: &Environment) -> Result<ResolvedEnvironment>;
}

/// Hands out credentials scoped to a resolved environment.
#[allow(async_fn_in_trait)]
pub trait SessionProvider {
    /// Obtain a session for `env` usable for `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if no credentials are available or they do not grant
    /// access to `env`.
    async fn for_environment(&self, env: &ResolvedEnvironment, mode: AccessMode)
    -> Result<Session>;
}

/// Composite trait: any type implementing both sub-traits is an `SdkProvider`.
pub trait SdkProvider: EnvironmentResolver + SessionProvider {}

/// Blanket implementation: any type implementing both sub-traits is an `SdkProvider`.
impl<T> SdkProvider for T where T: EnvironmentResolver + SessionProvider {}

// ── Stack Ports ───────────────────────────────────────────────────────────────

/// Reads the state of a deployed stack.
#[allow(async_fn_in_trait)]
pub trait StackLookup {
    /// Look up `stack_name` in `env`.
    ///
    /// Returns `Ok(None)` when the stack does not exist; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the query itself fails.
    async fn lookup(
        &self,
        env: &ResolvedEnvironment,
        session: &Session,
        stack_name: &str,
    ) -> Result<Option<DeployedStack>>;
}

/// Creates or updates a stack from a packaged artifact.
#[allow(async_fn_in_trait)]
pub trait DeploymentEngine {
    /// Deploy the request's stack artifact.
    ///
    /// # Errors
    ///
    /// Returns engine-specific errors (conflicting operation in progress,
    /// validation failure, execution failure). Callers propagate them as-is.
    async fn deploy_stack(&self, request: DeploymentRequest) -> Result<DeployStackResult>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load the configuration, returning defaults if none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if stored configuration exists but cannot be read.
    fn load(&self) -> Result<PlinthConfig>;
    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    fn save(&self, config: &PlinthConfig) -> Result<()>;
    /// Location of the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be determined.
    fn path(&self) -> Result<std::path::PathBuf>;
}
