//! Error types for code generation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Configuration decoding, validation or resolution error.
    #[error("{0}")]
    Schema(#[from] protoforge_schema::SchemaError),

    /// IO error on a specific path.
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Template rendering error.
    #[error("failed to render template '{}': {source}", path.display())]
    Render {
        /// Template file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: handlebars::RenderError,
    },

    /// Template context serialization error.
    #[error("failed to build template context: {0}")]
    Context(#[from] serde_json::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl From<protoforge_schema::ParseError> for CodegenError {
    fn from(err: protoforge_schema::ParseError) -> Self {
        Self::Schema(err.into())
    }
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Wraps an IO error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
