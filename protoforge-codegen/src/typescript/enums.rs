//! Enum and union code generation.

use super::{keyword, property_key};
use crate::error::CodegenError;
use protoforge_schema::ir::enum_options;

/// Generator for enum and union definitions.
pub struct EnumGenerator {
    export: bool,
}

impl EnumGenerator {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(export: bool) -> Self {
        Self { export }
    }

    /// Generates an enum whose members carry their positional discriminant.
    #[must_use]
    pub fn generate_enum(&self, name: &str, labels: &[String]) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}enum {} {{\n", keyword(self.export), name));
        for option in enum_options(labels) {
            output.push_str(&format!(
                "  {} = {},\n",
                property_key(&option.label),
                option.value
            ));
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates a union alias over named types.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` for a union without members.
    pub fn generate_union(&self, name: &str, options: &[String]) -> Result<String, CodegenError> {
        if options.is_empty() {
            return Err(CodegenError::generation(format!(
                "union '{name}' has no members"
            )));
        }
        Ok(format!(
            "{}type {} = {};\n\n",
            keyword(self.export),
            name,
            options.join(" | ")
        ))
    }
}
