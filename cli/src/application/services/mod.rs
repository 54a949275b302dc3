//! Application services: use-case orchestration over the port traits.

pub mod bootstrap;
pub mod config_service;
pub mod stack_status;
