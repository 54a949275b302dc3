//! Infrastructure layer: concrete implementations of application port traits.
//!
//! Contains all I/O-performing code: process execution, the `aws` CLI
//! adapters and the config file store.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod aws;
pub mod command_runner;
pub mod config;
