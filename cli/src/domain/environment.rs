//! Target environments and the sessions scoped to them.
//!
//! An [`Environment`] is what the user asks for and may contain placeholders.
//! A [`ResolvedEnvironment`] is what the resolver returns: a concrete account
//! and region.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use plinth_common::{ENVIRONMENT_SCHEME, UNKNOWN_ACCOUNT, UNKNOWN_REGION};
use regex::Regex;

use crate::domain::error::EnvironmentError;

static ACCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[0-9]{12}$").expect("valid regex")
});

static REGION_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z]{2}(-[a-z]+)+-[0-9]+$").expect("valid regex")
});

/// Logical target environment, e.g. `aws://123456789012/eu-west-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub account: String,
    pub region: String,
}

impl Environment {
    /// Both account and region left to the credentials' defaults.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            account: UNKNOWN_ACCOUNT.to_string(),
            region: UNKNOWN_REGION.to_string(),
        }
    }

    #[must_use]
    pub fn has_unknown_account(&self) -> bool {
        self.account == UNKNOWN_ACCOUNT
    }

    #[must_use]
    pub fn has_unknown_region(&self) -> bool {
        self.region == UNKNOWN_REGION
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ENVIRONMENT_SCHEME}{}/{}", self.account, self.region)
    }
}

impl FromStr for Environment {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EnvironmentError::Invalid(s.to_string());
        let rest = s.strip_prefix(ENVIRONMENT_SCHEME).ok_or_else(invalid)?;
        let (account, region) = rest.split_once('/').ok_or_else(invalid)?;
        if account.is_empty() || region.is_empty() || region.contains('/') {
            return Err(invalid());
        }
        if account != UNKNOWN_ACCOUNT && !ACCOUNT_RE.is_match(account) {
            return Err(EnvironmentError::InvalidAccount(account.to_string()));
        }
        if region != UNKNOWN_REGION && !REGION_RE.is_match(region) {
            return Err(invalid());
        }
        Ok(Self {
            account: account.to_string(),
            region: region.to_string(),
        })
    }
}

/// Concrete environment with account and region both known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    pub account: String,
    pub region: String,
}

impl ResolvedEnvironment {
    #[must_use]
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
        }
    }

    /// Identifier in `aws://account/region` form.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{ENVIRONMENT_SCHEME}{}/{}", self.account, self.region)
    }
}

impl fmt::Display for ResolvedEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// What a session will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ForReading,
    ForWriting,
}

/// Credentials context scoped to one resolved environment.
///
/// Opaque to the pipeline; only the session provider and its consumers look
/// inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub environment: ResolvedEnvironment,
    pub mode: AccessMode,
    /// Named credentials profile, if any.
    pub profile: Option<String>,
    /// Identity the credentials resolved to.
    pub caller_arn: Option<String>,
}
