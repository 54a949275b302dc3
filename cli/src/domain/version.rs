//! Bootstrap version extraction: pure and total.
//!
//! Every template yields exactly one version. Missing or unreadable markers
//! resolve to `0`, the oldest possible version.

use plinth_common::{BOOTSTRAP_VERSION_OUTPUT, BOOTSTRAP_VERSION_RESOURCE};
use serde_json::Value;

use crate::domain::template::Template;

/// Bootstrap protocol version of a template or a deployed stack.
pub type BootstrapVersion = u64;

/// Read the bootstrap version marker from a template.
///
/// Candidates are checked in order: the `BootstrapVersion` output value, then
/// the `CdkBootstrapVersion` resource's `Properties.Value`. The first
/// candidate that reads as a version wins; otherwise the result is `0`.
#[must_use]
pub fn extract_version(template: &Template) -> BootstrapVersion {
    [
        template.output_value(BOOTSTRAP_VERSION_OUTPUT),
        template.resource_property_value(BOOTSTRAP_VERSION_RESOURCE),
    ]
    .into_iter()
    .flatten()
    .find_map(version_from_value)
    .unwrap_or(0)
}

/// Interpret a single marker value.
///
/// Numbers must be non-negative integers (an integral float such as `6.0`
/// counts). Strings are read as a base-10 integer prefix; see
/// [`parse_version_str`].
#[must_use]
pub fn version_from_value(value: &Value) -> Option<BootstrapVersion> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            let f = n.as_f64()?;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let v = f as u64;
            #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
            let exact = f >= 0.0 && f.fract() == 0.0 && v as f64 == f;
            exact.then_some(v)
        }),
        Value::String(s) => parse_version_str(s),
        _ => None,
    }
}

/// Parse the leading base-10 integer of a string.
///
/// Surrounding whitespace and a single leading `+` are skipped, then the run
/// of ASCII digits is taken. Anything after the digits is ignored. Strings
/// that do not start with a digit, negative numbers and values that overflow
/// `u64` yield `None`.
#[must_use]
pub fn parse_version_str(s: &str) -> Option<BootstrapVersion> {
    let s = s.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}
