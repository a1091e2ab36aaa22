//! YAML configuration parser.
//!
//! This module decodes a project configuration document into the strongly
//! typed [`Config`] structure. Type expressions are discriminated into
//! [`TypeExpr`] shapes here, once, so later passes never re-inspect raw YAML.

use crate::error::ParseError;
use crate::types::{Config, TypeExpr};
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::path::Path;

/// Top-level key that is no longer accepted.
pub const REMOVED_INITIALIZE_ARGS: &str = "initializeArgs";

/// Message returned when the removed `initializeArgs` key is present.
pub const REMOVED_INITIALIZE_ARGS_MESSAGE: &str =
    "initializeArgs is no longer supported, please remove it from your protoforge.yml";

/// Parses a configuration document from a YAML string.
///
/// # Arguments
/// * `yaml` - Configuration document content
///
/// # Returns
/// Decoded configuration or parse error.
///
/// # Errors
/// Returns `ParseError` if the YAML is malformed, a field is unknown or has
/// the wrong shape, or the removed `initializeArgs` key is present.
pub fn parse_config(yaml: &str) -> Result<Config, ParseError> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;

    let Some(root) = value.as_mapping() else {
        return Err(ParseError::InvalidStructure {
            message: "the configuration document must be a mapping".to_string(),
        });
    };

    // Checked before decoding so the directive wins over a generic type error.
    if root.contains_key(REMOVED_INITIALIZE_ARGS) {
        return Err(ParseError::removed_field(
            REMOVED_INITIALIZE_ARGS,
            REMOVED_INITIALIZE_ARGS_MESSAGE,
        ));
    }

    reject_nulls(root)?;

    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        ParseError::invalid_field(path, err.into_inner().to_string())
    })
}

/// Top-level keys whose value may be omitted but never set to `null`.
const NON_NULL_KEYS: [&str; 7] = ["types", "methods", "auth", "userState", "error", "tick", "events"];

/// Authentication providers, which are strict objects when present.
const AUTH_PROVIDERS: [&str; 3] = ["anonymous", "nickname", "google"];

/// Rejects explicit `null` values that serde would read as absent or empty.
/// Method entries stay nullable: `joinGame:` declares a method without args.
fn reject_nulls(root: &serde_yaml::Mapping) -> Result<(), ParseError> {
    for key in NON_NULL_KEYS {
        if root.get(key).is_some_and(serde_yaml::Value::is_null) {
            return Err(ParseError::invalid_field(key, "must not be null"));
        }
    }

    if let Some(auth) = root.get("auth").and_then(serde_yaml::Value::as_mapping) {
        for provider in AUTH_PROVIDERS {
            if auth.get(provider).is_some_and(serde_yaml::Value::is_null) {
                return Err(ParseError::invalid_field(
                    format!("auth.{provider}"),
                    "must be an object, use `{}` for default options",
                ));
            }
        }
    }

    Ok(())
}

/// Reads and parses a configuration document from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or does not parse.
pub fn load_config(path: &Path) -> Result<Config, ParseError> {
    let yaml = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&yaml)?;
    tracing::debug!(
        "Loaded {} with {} types and {} methods",
        path.display(),
        config.types.len(),
        config.methods.len()
    );
    Ok(config)
}

impl<'de> Deserialize<'de> for TypeExpr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TypeExprVisitor)
    }
}

struct TypeExprVisitor;

impl<'de> Visitor<'de> for TypeExprVisitor {
    type Value = TypeExpr;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a type name, a list of names, or a mapping of field names to type names")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(TypeExpr::Name(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(TypeExpr::Name(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<String>()? {
            items.push(item);
        }
        if items.is_empty() {
            return Err(de::Error::invalid_length(0, &"at least one entry"));
        }
        Ok(TypeExpr::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, ty)) = map.next_entry::<String, String>()? {
            fields.insert(name, TypeExpr::Name(ty));
        }
        Ok(TypeExpr::Object(fields))
    }
}
