//! Named-type IR handed to codec generators.
//!
//! Unlike [`protoforge_schema::Arg`], this IR keeps named types as
//! references and allows at most one modifier per object field, which is
//! what wire codec generators consume.

use crate::error::CodegenError;
use indexmap::IndexMap;
use protoforge_schema::PrimitiveKind;

/// Named types in declaration order.
pub type CodecTypes = IndexMap<String, CodecType>;

/// A named type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecType {
    /// Alias of a primitive.
    Primitive(PrimitiveKind),
    /// Alias of another named type.
    Reference(String),
    /// Object with typed fields.
    Object(IndexMap<String, ChildType>),
    /// Union over named types.
    Union(Vec<String>),
    /// Enumeration of labels, discriminated by position.
    Enum(Vec<String>),
}

/// Type of an object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildType {
    /// Base type.
    pub base: FieldType,
    /// Optional single modifier.
    pub modifier: Option<Modifier>,
}

/// Base type of an object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Primitive keyword.
    Primitive(PrimitiveKind),
    /// Named type.
    Reference(String),
}

/// Field modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Sequence of the base type.
    Array,
    /// Base type may be absent.
    Optional,
}

impl ChildType {
    /// Creates a child type without a modifier.
    #[must_use]
    pub fn new(base: FieldType) -> Self {
        Self {
            base,
            modifier: None,
        }
    }

    /// Creates a child type with a modifier.
    #[must_use]
    pub fn with_modifier(base: FieldType, modifier: Modifier) -> Self {
        Self {
            base,
            modifier: Some(modifier),
        }
    }
}

/// Generates codec source text from named types.
pub trait CodecGenerator {
    /// Short name of the target, used in logs.
    fn target(&self) -> &'static str;

    /// Generates source text for all named types.
    ///
    /// # Errors
    /// Returns `CodegenError` if the types cannot be expressed in the target.
    fn generate(&self, types: &CodecTypes) -> Result<String, CodegenError>;
}
