//! Bootstrap template document.
//!
//! The template is treated as an opaque mapping. Only the two version marker
//! paths are ever interpreted (see [`crate::domain::version`]).

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::domain::error::TemplateError;

/// An infrastructure-as-code template held as a JSON value tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    document: Value,
}

impl Template {
    /// Wrap an already-parsed document.
    #[must_use]
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// Parse template text. JSON is tried first, then YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is neither JSON nor YAML, or if the
    /// top-level value is not a mapping.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let document = match serde_json::from_str::<Value>(text) {
            Ok(v) => v,
            Err(json_err) => {
                let yaml = serde_yaml::from_str::<serde_yaml::Value>(text)
                    .map_err(|yaml_err| TemplateError::Parse(format!("{json_err}; {yaml_err}")))?;
                yaml_to_json(yaml)?
            }
        };
        if !document.is_object() {
            return Err(TemplateError::NotAMapping(value_kind(&document)));
        }
        Ok(Self { document })
    }

    /// Borrow the underlying document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Value of `Outputs.<name>.Value`, if present.
    #[must_use]
    pub fn output_value(&self, name: &str) -> Option<&Value> {
        self.document.get("Outputs")?.get(name)?.get("Value")
    }

    /// Value of `Resources.<logical_id>.Properties.Value`, if present.
    #[must_use]
    pub fn resource_property_value(&self, logical_id: &str) -> Option<&Value> {
        self.document
            .get("Resources")?
            .get(logical_id)?
            .get("Properties")?
            .get("Value")
    }

    /// Serialize as pretty JSON with two-space indentation.
    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        // A `Value` tree always serializes.
        serde_json::to_string_pretty(&self.document).unwrap_or_default()
    }

    /// Hex-encoded SHA-256 of the compact JSON form.
    ///
    /// `serde_json` keeps object keys sorted, so two templates with the same
    /// content hash the same regardless of source formatting.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let compact = serde_json::to_vec(&self.document).unwrap_or_default();
        hex_encode(&Sha256::digest(&compact))
    }
}

/// Convert a YAML tree to JSON, expanding short-form intrinsic functions
/// (`!Ref x`, `!Sub s`, `!GetAtt a.b`) into their long form.
fn yaml_to_json(yaml: serde_yaml::Value) -> Result<Value, TemplateError> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                object.insert(mapping_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => {
            let serde_yaml::value::TaggedValue { tag, value } = *tagged;
            let tag = tag.to_string();
            let name = tag.trim_start_matches('!');
            let key = match name {
                "Ref" | "Condition" => name.to_string(),
                _ => format!("Fn::{name}"),
            };
            let argument = match (name, value) {
                // `!GetAtt Resource.Attribute` is the dotted form of a
                // two-element list; the attribute itself may contain dots.
                ("GetAtt", Yaml::String(path)) => match path.split_once('.') {
                    Some((resource, attribute)) => Value::Array(vec![
                        Value::String(resource.to_string()),
                        Value::String(attribute.to_string()),
                    ]),
                    None => Value::String(path),
                },
                (_, value) => yaml_to_json(value)?,
            };
            let mut object = serde_json::Map::new();
            object.insert(key, argument);
            Value::Object(object)
        }
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Value, TemplateError> {
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| TemplateError::Parse(format!("number {n} has no JSON form")))
}

fn mapping_key(key: serde_yaml::Value) -> Result<String, TemplateError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        other => Err(TemplateError::Parse(format!(
            "mapping key {other:?} is not a scalar"
        ))),
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Lowercase hex encoding of a byte slice.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
