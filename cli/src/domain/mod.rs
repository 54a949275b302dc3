//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod artifact;
pub mod config;
pub mod deploy;
pub mod environment;
pub mod error;
pub mod template;
pub mod upgrade;
pub mod version;

pub use artifact::{ArtifactBundle, StackArtifact, package_bootstrap_stack};
pub use config::{PlinthConfig, validate_config_key, validate_config_value};
pub use deploy::{BootstrapOptions, DeployStackResult, DeployedStack, DeploymentRequest, Parameters};
pub use environment::{AccessMode, Environment, ResolvedEnvironment, Session};
pub use error::{BootstrapError, ConfigError, EnvironmentError, TemplateError};
pub use template::Template;
pub use upgrade::check_upgrade;
pub use version::{BootstrapVersion, extract_version};
