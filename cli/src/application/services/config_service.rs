//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::PlinthConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if stored configuration cannot be read.
pub fn load_config(store: &impl ConfigStore) -> Result<PlinthConfig> {
    store.load()
}

/// Validate and apply `key = value`, then persist the result.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the store fails.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<PlinthConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
