//! Resolved argument IR.
//!
//! This module turns [`TypeExpr`] values into [`Arg`] graphs: closed,
//! fully-resolved trees that templates walk to emit typed code. Resolution
//! reads the type table and plugin list through a [`Resolver`] and never
//! mutates them.

use crate::error::SchemaError;
use crate::types::{PrimitiveKind, TypeExpr, TypeTable};
use indexmap::IndexMap;
use serde::Serialize;

/// Resolved type expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arg {
    /// True if this node was reached through a declared type name.
    pub alias: bool,
    /// Textual expression this node came from, used as an emission label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_string: Option<String>,
    /// Node shape.
    #[serde(flatten)]
    pub kind: ArgKind,
}

/// Shape of a resolved [`Arg`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ArgKind {
    /// Object literal with sanitized field names.
    Object {
        /// Fields in declaration order.
        properties: IndexMap<String, Arg>,
    },
    /// Union over declared types.
    Union {
        /// Variant name to resolved variant.
        options: IndexMap<String, Arg>,
    },
    /// Array of the inner type.
    Array {
        /// Element type.
        items: Box<Arg>,
    },
    /// Optional inner type.
    Optional {
        /// Wrapped type.
        item: Box<Arg>,
    },
    /// Enumeration of labels.
    Enum {
        /// Labels with their positional discriminants.
        options: Vec<EnumOption>,
    },
    /// Type owned by a project plugin.
    Plugin {
        /// Wrapped type.
        item: Box<Arg>,
    },
    /// String primitive.
    String,
    /// Integer primitive.
    Int,
    /// Float primitive.
    Float,
    /// Boolean primitive.
    Boolean,
}

/// Enum label and its wire discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    /// Label as declared.
    pub label: String,
    /// Position of the label in declaration order.
    pub value: u32,
}

impl From<PrimitiveKind> for ArgKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::String => Self::String,
            PrimitiveKind::Int => Self::Int,
            PrimitiveKind::Float => Self::Float,
            PrimitiveKind::Boolean => Self::Boolean,
        }
    }
}

impl Arg {
    /// Returns the tag of this node as it appears in templates.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self.kind {
            ArgKind::Object { .. } => "object",
            ArgKind::Union { .. } => "union",
            ArgKind::Array { .. } => "array",
            ArgKind::Optional { .. } => "optional",
            ArgKind::Enum { .. } => "enum",
            ArgKind::Plugin { .. } => "plugin",
            ArgKind::String => "string",
            ArgKind::Int => "int",
            ArgKind::Float => "float",
            ArgKind::Boolean => "boolean",
        }
    }

    fn wrap_plugin(self, name: &str, alias: bool) -> Self {
        Self {
            alias,
            type_string: Some(name.to_string()),
            kind: ArgKind::Plugin {
                item: Box::new(self),
            },
        }
    }
}

/// Read-only resolution context: the type table and the plugin names.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    types: &'a TypeTable,
    plugins: &'a [String],
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over a type table and a plugin list.
    #[must_use]
    pub fn new(types: &'a TypeTable, plugins: &'a [String]) -> Self {
        Self { types, plugins }
    }

    /// Returns true if `name` is a declared type.
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns true if `name` is owned by a plugin.
    #[must_use]
    pub fn is_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p == name)
    }

    /// Resolves a type expression into an [`Arg`].
    ///
    /// # Arguments
    /// * `expr` - Expression to resolve
    /// * `alias` - Whether the expression is the body of a declared type
    ///
    /// # Errors
    /// Returns `SchemaError::InvalidTypeExpression` for strings naming neither
    /// a declared type nor a primitive, and `SchemaError::RecursiveType` when a
    /// declared type reaches itself.
    pub fn resolve(&self, expr: &TypeExpr, alias: bool) -> Result<Arg, SchemaError> {
        self.resolve_expr(expr, alias, None, &mut Vec::new())
    }

    /// Resolves a type expression string into an [`Arg`].
    ///
    /// # Errors
    /// See [`Resolver::resolve`].
    pub fn resolve_str(&self, expr: &str, alias: bool) -> Result<Arg, SchemaError> {
        self.resolve_name(expr, alias, None, &mut Vec::new())
    }

    fn resolve_expr(
        &self,
        expr: &TypeExpr,
        alias: bool,
        type_string: Option<&str>,
        stack: &mut Vec<String>,
    ) -> Result<Arg, SchemaError> {
        let type_string = type_string.map(str::to_string);
        match expr {
            TypeExpr::Name(name) => self.resolve_name(name, alias, type_string.as_deref(), stack),
            TypeExpr::List(items) if items.iter().all(|item| self.is_declared(item)) => {
                let options = items
                    .iter()
                    .map(|item| Ok((item.clone(), self.resolve_name(item, false, None, stack)?)))
                    .collect::<Result<IndexMap<_, _>, SchemaError>>()?;
                Ok(Arg {
                    alias,
                    type_string,
                    kind: ArgKind::Union { options },
                })
            }
            TypeExpr::List(labels) => Ok(Arg {
                alias,
                type_string,
                kind: ArgKind::Enum {
                    options: enum_options(labels),
                },
            }),
            TypeExpr::Object(fields) => {
                let properties = fields
                    .iter()
                    .map(|(name, ty)| {
                        let arg = self.resolve_expr(ty, false, None, stack)?;
                        Ok((sanitize_field_name(name), arg))
                    })
                    .collect::<Result<IndexMap<_, _>, SchemaError>>()?;
                Ok(Arg {
                    alias,
                    type_string,
                    kind: ArgKind::Object { properties },
                })
            }
        }
    }

    fn resolve_name(
        &self,
        expr: &str,
        alias: bool,
        type_string: Option<&str>,
        stack: &mut Vec<String>,
    ) -> Result<Arg, SchemaError> {
        let label = type_string.unwrap_or(expr).to_string();

        if let Some(inner) = expr.strip_suffix('?') {
            let item = self.resolve_name(inner, false, None, stack)?;
            return Ok(Arg {
                alias,
                type_string: Some(label),
                kind: ArgKind::Optional {
                    item: Box::new(item),
                },
            });
        }

        if let Some(inner) = expr.strip_suffix("[]") {
            let items = self.resolve_name(inner, false, None, stack)?;
            return Ok(Arg {
                alias,
                type_string: Some(label),
                kind: ArgKind::Array {
                    items: Box::new(items),
                },
            });
        }

        if let Some(declared) = self.types.get(expr) {
            if stack.iter().any(|name| name == expr) {
                let mut path = stack.join(" -> ");
                path.push_str(" -> ");
                path.push_str(expr);
                return Err(SchemaError::RecursiveType { path });
            }

            stack.push(expr.to_string());
            let resolved = self.resolve_expr(declared, true, Some(expr), stack);
            stack.pop();
            let resolved = resolved?;

            tracing::trace!("Resolved type {} as {}", expr, resolved.tag());
            return Ok(if self.is_plugin(expr) {
                resolved.wrap_plugin(expr, alias)
            } else {
                resolved
            });
        }

        if let Some(primitive) = PrimitiveKind::from_keyword(expr) {
            let arg = Arg {
                alias,
                type_string: Some(label),
                kind: primitive.into(),
            };
            return Ok(if self.is_plugin(expr) {
                arg.wrap_plugin(expr, alias)
            } else {
                arg
            });
        }

        Err(SchemaError::invalid_expression(expr))
    }
}

/// Builds enum options with positional discriminants.
#[must_use]
pub fn enum_options(labels: &[String]) -> Vec<EnumOption> {
    labels
        .iter()
        .zip(0u32..)
        .map(|(label, value)| EnumOption {
            label: label.clone(),
            value,
        })
        .collect()
}

/// Strips every non-word character (anything but ASCII letters, digits and `_`).
#[must_use]
pub fn sanitize_field_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Upper-cases the first character of a string.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the synthesized request type name for a method.
#[must_use]
pub fn request_type_name(method: &str) -> String {
    format!("I{}Request", capitalize(method))
}
