//! Configuration document definitions.
//!
//! This module contains the data structures a project configuration decodes
//! into: the document itself, its authentication options, and the
//! type-expression AST used by every declared type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared types keyed by name, in declaration order.
pub type TypeTable = IndexMap<String, TypeExpr>;

/// Method argument mapping (argument name to type expression string).
pub type MethodArgs = IndexMap<String, String>;

/// Complete project configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Declared types.
    pub types: TypeTable,
    /// Declared methods and their argument mappings (`None` for no arguments).
    pub methods: IndexMap<String, Option<MethodArgs>>,
    /// Authentication providers.
    pub auth: AuthConfig,
    /// Name of the type holding per-user state.
    pub user_state: String,
    /// Type expression of the error payload.
    pub error: String,
    /// Server tick period in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick: Option<i64>,
    /// Declared events (event name to type expression string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<IndexMap<String, String>>,
}

impl Config {
    /// Returns true if a type with the given name is declared.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Looks up a declared type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeExpr> {
        self.types.get(name)
    }
}

/// Authentication providers. Every provider is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Anonymous login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<AnonymousAuth>,
    /// Nickname login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<NicknameAuth>,
    /// Google sign-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<GoogleAuth>,
}

/// Anonymous login options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnonymousAuth {
    /// Separator used when composing generated user names.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for AnonymousAuth {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

fn default_separator() -> String {
    "-".to_string()
}

/// Nickname login options (none yet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NicknameAuth {}

/// Google sign-in options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GoogleAuth {
    /// OAuth client identifier.
    pub client_id: String,
}

/// Unresolved, user-authored type expression.
///
/// The list and mapping shapes are told apart at load time; whether a list
/// is a union or an enum depends on the type table and is decided during
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeExpr {
    /// Primitive keyword, declared type name, or either with `?` / `[]` suffixes.
    Name(String),
    /// Union of declared type names, or enum of labels.
    List(Vec<String>),
    /// Object literal (field name to field type).
    Object(IndexMap<String, TypeExpr>),
}

impl TypeExpr {
    /// Creates a name expression.
    pub fn name(s: impl Into<String>) -> Self {
        Self::Name(s.into())
    }

    /// Creates an object expression from `(field, type)` string pairs.
    pub fn object<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), Self::Name(v.into())))
                .collect(),
        )
    }

    /// Creates an empty object expression.
    #[must_use]
    pub fn empty_object() -> Self {
        Self::Object(IndexMap::new())
    }

    /// Returns a short label for the expression shape.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }
}

impl From<&str> for TypeExpr {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

/// Built-in primitive keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// UTF-8 string.
    String,
    /// Integer.
    Int,
    /// Floating point number.
    Float,
    /// Boolean.
    Boolean,
}

impl PrimitiveKind {
    /// All primitive kinds, in keyword order.
    pub const ALL: [Self; 4] = [Self::String, Self::Int, Self::Float, Self::Boolean];

    /// Parses a primitive keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Returns the keyword for this primitive.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_keywords() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_keyword("String"), None);
        assert_eq!(PrimitiveKind::from_keyword("int[]"), None);
    }

    #[test]
    fn test_type_expr_object_builder() {
        let expr = TypeExpr::object([("dx", "int"), ("dy", "int")]);
        match expr {
            TypeExpr::Object(fields) => {
                let keys: Vec<_> = fields.keys().cloned().collect();
                assert_eq!(keys, vec!["dx", "dy"]);
                assert_eq!(fields["dx"], TypeExpr::name("int"));
            }
            other => panic!("expected object, got {}", other.shape()),
        }
    }

    #[test]
    fn test_anonymous_auth_default_separator() {
        assert_eq!(AnonymousAuth::default().separator, "-");
    }
}
