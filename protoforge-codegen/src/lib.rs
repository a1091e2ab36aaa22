//! # Protoforge Codegen
//!
//! Project generation from a declarative configuration.
//!
//! This crate provides:
//! - Enrichment of a validated configuration into a template context
//! - A codec generator trait with a TypeScript implementation
//! - Handlebars template tree expansion with path tokens
//! - The end-to-end [`Generator`] pipeline

pub mod codec;
pub mod enrich;
pub mod error;
pub mod generator;
pub mod template;
pub mod typescript;

pub use codec::{ChildType, CodecGenerator, CodecType, CodecTypes, FieldType, Modifier};
pub use enrich::{EnrichedDocument, build_codec_types, enrich};
pub use error::CodegenError;
pub use generator::{CONFIG_FILE_NAME, Generator, PLUGINS_DIR, discover_plugins, generate};
pub use template::{ExpandReport, TemplateEngine};
pub use typescript::TypeScriptCodec;

/// Builds the template context from a configuration string.
///
/// # Arguments
/// * `yaml` - Configuration document
/// * `plugins` - Plugin-owned type names
/// * `app_name` - Application name
///
/// # Returns
/// The template context, including the generated TypeScript codec.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or enrichment fails.
pub fn context_from_yaml(
    yaml: &str,
    plugins: &[String],
    app_name: &str,
) -> Result<serde_json::Value, CodegenError> {
    let config = protoforge_schema::parse_and_validate(yaml)?;
    let mut doc = enrich(&config, plugins, app_name)?;
    doc.render_codec(&TypeScriptCodec::new())?;
    doc.to_context()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_from_yaml() {
        let yaml = r#"
types:
  PlayerState:
    score: int
methods:
  joinGame:
auth:
  anonymous: {}
userState: PlayerState
error: string
"#;
        let context = context_from_yaml(yaml, &[], "demo").expect("Failed to build context");

        assert_eq!(context["appName"], "demo");
        assert_eq!(context["userState"], "PlayerState");
        assert_eq!(context["error"]["type"], "string");
        assert_eq!(context["requests"]["joinGame"]["type"], "object");
        let delta_pack = context["deltaPack"].as_str().expect("deltaPack is a string");
        assert!(delta_pack.contains("PlayerState"));
    }

    #[test]
    fn test_context_from_yaml_missing_user_state() {
        let yaml = r#"
types: {}
methods: {}
auth: {}
userState: Missing
error: string
"#;
        let err = context_from_yaml(yaml, &[], "demo").expect_err("undeclared user state");
        assert!(matches!(
            err,
            CodegenError::Schema(protoforge_schema::SchemaError::MissingUserState { .. })
        ));
    }
}
