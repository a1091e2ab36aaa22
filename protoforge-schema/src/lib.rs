//! # Protoforge Schema
//!
//! Project configuration schema and type-expression resolution.
//!
//! This crate provides:
//! - YAML configuration parsing into strongly typed structures
//! - Type-expression AST for declared types
//! - Configuration validation
//! - Resolution of type expressions into the [`Arg`] IR consumed by templates

pub mod error;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use ir::{Arg, ArgKind, EnumOption, Resolver, capitalize, request_type_name, sanitize_field_name};
pub use parser::{load_config, parse_config};
pub use types::{
    AnonymousAuth, AuthConfig, Config, GoogleAuth, MethodArgs, NicknameAuth, PrimitiveKind,
    TypeExpr, TypeTable,
};
pub use validation::validate_config;

/// Parses and validates a configuration document.
///
/// # Errors
/// Returns `SchemaError` if the document does not parse or fails validation.
pub fn parse_and_validate(yaml: &str) -> Result<Config, SchemaError> {
    let config = parse_config(yaml)?;
    validate_config(&config)?;
    Ok(config)
}
