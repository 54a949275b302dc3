//! Stack tags given on the command line as `KEY=VALUE`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single resource tag applied to the bootstrap stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Returned when a `KEY=VALUE` string cannot be split into a tag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseTagError {
    #[error("tag '{0}' must have the form KEY=VALUE")]
    MissingSeparator(String),

    #[error("tag '{0}' has an empty key")]
    EmptyKey(String),
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| ParseTagError::MissingSeparator(s.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseTagError::EmptyKey(s.to_string()));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
