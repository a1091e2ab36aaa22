//! Alias and object type generation.

use super::{field_type, keyword, property_key};
use crate::codec::{ChildType, Modifier};
use indexmap::IndexMap;

/// Generator for type aliases and object types.
pub struct TypeGenerator {
    export: bool,
}

impl TypeGenerator {
    /// Creates a new type generator.
    #[must_use]
    pub fn new(export: bool) -> Self {
        Self { export }
    }

    /// Generates a type alias.
    #[must_use]
    pub fn generate_alias(&self, name: &str, target: &str) -> String {
        format!("{}type {} = {};\n\n", keyword(self.export), name, target)
    }

    /// Generates an object type with one property per field.
    #[must_use]
    pub fn generate_object(&self, name: &str, fields: &IndexMap<String, ChildType>) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}type {} = {{\n", keyword(self.export), name));
        for (field, child) in fields {
            output.push_str(&self.generate_field(field, child));
        }
        output.push_str("};\n\n");

        output
    }

    fn generate_field(&self, name: &str, child: &ChildType) -> String {
        let key = property_key(name);
        let base = field_type(&child.base);

        match child.modifier {
            None => format!("  {key}: {base};\n"),
            Some(Modifier::Optional) => format!("  {key}?: {base};\n"),
            Some(Modifier::Array) => format!("  {key}: {base}[];\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FieldType;
    use protoforge_schema::PrimitiveKind;

    #[test]
    fn test_generate_alias() {
        let generator = TypeGenerator::new(true);
        assert_eq!(
            generator.generate_alias("PlayerId", "UserId"),
            "export type PlayerId = UserId;\n\n"
        );
    }

    #[test]
    fn test_generate_empty_object() {
        let generator = TypeGenerator::new(true);
        let output = generator.generate_object("IJoinGameRequest", &IndexMap::new());
        assert_eq!(output, "export type IJoinGameRequest = {\n};\n\n");
    }

    #[test]
    fn test_generate_object_fields() {
        let generator = TypeGenerator::new(false);
        let mut fields = IndexMap::new();
        fields.insert(
            "nickname".to_string(),
            ChildType::with_modifier(
                FieldType::Primitive(PrimitiveKind::String),
                Modifier::Optional,
            ),
        );
        fields.insert(
            "cards".to_string(),
            ChildType::with_modifier(FieldType::Reference("Card".to_string()), Modifier::Array),
        );
        fields.insert(
            "ready".to_string(),
            ChildType::new(FieldType::Primitive(PrimitiveKind::Boolean)),
        );

        let output = generator.generate_object("Player", &fields);
        assert_eq!(
            output,
            "type Player = {\n  nickname?: string;\n  cards: Card[];\n  ready: boolean;\n};\n\n"
        );
    }

    #[test]
    fn test_generate_object_escapes_keys() {
        let generator = TypeGenerator::new(false);
        let mut fields = IndexMap::new();
        fields.insert(
            "1st".to_string(),
            ChildType::new(FieldType::Primitive(PrimitiveKind::Int)),
        );
        fields.insert(
            "say\"hi".to_string(),
            ChildType::new(FieldType::Primitive(PrimitiveKind::String)),
        );

        let output = generator.generate_object("Odd", &fields);
        assert_eq!(
            output,
            "type Odd = {\n  \"1st\": number;\n  \"say\\\"hi\": string;\n};\n\n"
        );
    }
}
