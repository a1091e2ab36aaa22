//! TypeScript code generation modules.

pub mod enums;
pub mod types;

pub use enums::EnumGenerator;
pub use types::TypeGenerator;

use crate::codec::{CodecGenerator, CodecType, CodecTypes, FieldType};
use crate::error::CodegenError;
use protoforge_schema::PrimitiveKind;

/// Codec generator emitting TypeScript declarations.
#[derive(Debug, Clone, Copy)]
pub struct TypeScriptCodec {
    export: bool,
}

impl Default for TypeScriptCodec {
    fn default() -> Self {
        Self { export: true }
    }
}

impl TypeScriptCodec {
    /// Creates a generator that exports every declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether declarations are exported.
    #[must_use]
    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }
}

impl CodecGenerator for TypeScriptCodec {
    fn target(&self) -> &'static str {
        "typescript"
    }

    fn generate(&self, types: &CodecTypes) -> Result<String, CodegenError> {
        let type_gen = TypeGenerator::new(self.export);
        let enum_gen = EnumGenerator::new(self.export);
        let mut output = String::new();

        for (name, ty) in types {
            let decl = match ty {
                CodecType::Primitive(kind) => type_gen.generate_alias(name, primitive_type(*kind)),
                CodecType::Reference(target) => type_gen.generate_alias(name, target),
                CodecType::Object(fields) => type_gen.generate_object(name, fields),
                CodecType::Union(options) => enum_gen.generate_union(name, options)?,
                CodecType::Enum(labels) => enum_gen.generate_enum(name, labels),
            };
            output.push_str(&decl);
        }

        Ok(output)
    }
}

/// Returns the TypeScript type for a primitive.
#[must_use]
pub const fn primitive_type(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "string",
        PrimitiveKind::Int | PrimitiveKind::Float => "number",
        PrimitiveKind::Boolean => "boolean",
    }
}

/// Returns the TypeScript type for a field base type.
#[must_use]
pub fn field_type(base: &FieldType) -> &str {
    match base {
        FieldType::Primitive(kind) => primitive_type(*kind),
        FieldType::Reference(name) => name,
    }
}

/// Returns true if `s` can be written as a bare identifier.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Returns `s` as a member or property key: bare when it is an identifier,
/// otherwise a string literal with quotes and backslashes escaped.
#[must_use]
pub fn property_key(s: &str) -> String {
    if is_identifier(s) {
        s.to_string()
    } else {
        serde_json::Value::String(s.to_string()).to_string()
    }
}

fn keyword(export: bool) -> &'static str {
    if export { "export " } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::build_codec_types;
    use protoforge_schema::TypeExpr;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Red"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("dark-red"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_generate_declaration_order() {
        let mut types = protoforge_schema::TypeTable::new();
        types.insert("UserId".to_string(), TypeExpr::name("string"));
        types.insert(
            "Color".to_string(),
            TypeExpr::List(vec!["Red".to_string(), "Blue".to_string()]),
        );
        types.insert(
            "Player".to_string(),
            TypeExpr::object([("id", "UserId"), ("color", "Color?"), ("scores", "int[]")]),
        );

        let codec_types = build_codec_types(&types).expect("Failed to build");
        let output = TypeScriptCodec::new()
            .generate(&codec_types)
            .expect("Failed to generate");

        let user_id = output.find("export type UserId = string;").expect("UserId");
        let color = output.find("export enum Color {").expect("Color");
        let player = output.find("export type Player = {").expect("Player");
        assert!(user_id < color && color < player);
        assert!(output.contains("  color?: Color;"));
        assert!(output.contains("  scores: number[];"));
    }

    #[test]
    fn test_generate_without_export() {
        let mut types = protoforge_schema::TypeTable::new();
        types.insert("Score".to_string(), TypeExpr::name("float"));

        let codec_types = build_codec_types(&types).expect("Failed to build");
        let output = TypeScriptCodec::new()
            .export(false)
            .generate(&codec_types)
            .expect("Failed to generate");
        assert_eq!(output, "type Score = number;\n\n");
    }
}
