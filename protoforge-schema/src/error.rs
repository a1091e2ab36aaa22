//! Error types for configuration loading, validation and type resolution.

use thiserror::Error;

/// Error type for decoding a configuration document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML syntax error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A field has the wrong shape, is unknown, or is missing.
    #[error("invalid field '{path}': {message}")]
    InvalidField {
        /// Dotted path of the offending field.
        path: String,
        /// Decoder message.
        message: String,
    },

    /// A field that used to be supported and must now be removed.
    #[error("{message}")]
    RemovedField {
        /// Field name.
        field: String,
        /// Directive shown to the user.
        message: String,
    },

    /// The document root is not a mapping.
    #[error("invalid document structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error reading '{path}': {source}")]
    Io {
        /// File that could not be read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Error type for schema validation and type resolution.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Structural error in the configuration document.
    #[error("schema error: {0}")]
    Parse(#[from] ParseError),

    /// A field passed decoding but violates a value constraint.
    #[error("schema error: field '{field}' {message}")]
    Validation {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// The `userState` type is not declared.
    #[error("invalid userState: type '{name}' is not declared")]
    MissingUserState {
        /// Declared user state type name.
        name: String,
    },

    /// Two field names of one object collapse to the same sanitized name.
    #[error("duplicate field '{field}' in '{owner}' after removing non-word characters")]
    DuplicateField {
        /// Type or method owning the fields.
        owner: String,
        /// Sanitized field name.
        field: String,
    },

    /// A type expression string that names neither a declared type nor a primitive.
    #[error("invalid type expression: '{expression}'")]
    InvalidTypeExpression {
        /// The unresolvable expression.
        expression: String,
    },

    /// A reference that is neither a declared type nor a primitive keyword.
    #[error("invalid primitive type '{name}'")]
    InvalidPrimitiveType {
        /// The unresolvable name.
        name: String,
    },

    /// A type table value that cannot be turned into a named type.
    #[error("invalid type '{name}': {message}")]
    InvalidType {
        /// Type name.
        name: String,
        /// Error message.
        message: String,
    },

    /// A named type refers back to itself while being resolved.
    #[error("recursive type reference detected: {path}")]
    RecursiveType {
        /// Chain of type names forming the cycle.
        path: String,
    },
}

impl ParseError {
    /// Creates an invalid field error.
    pub fn invalid_field(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a removed field error.
    pub fn removed_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemovedField {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates a validation error for a field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid type expression error.
    pub fn invalid_expression(expression: impl Into<String>) -> Self {
        Self::InvalidTypeExpression {
            expression: expression.into(),
        }
    }

    /// Creates an invalid primitive type error.
    pub fn invalid_primitive(name: impl Into<String>) -> Self {
        Self::InvalidPrimitiveType { name: name.into() }
    }

    /// Creates an invalid type error.
    pub fn invalid_type(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidType {
            name: name.into(),
            message: message.into(),
        }
    }
}
