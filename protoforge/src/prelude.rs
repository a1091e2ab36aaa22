//! Prelude module for convenient imports.
//!
//! ```ignore
//! use protoforge::prelude::*;
//! ```

// Schema types
pub use protoforge_schema::{
    Arg, ArgKind, Config, ParseError, PrimitiveKind, Resolver, SchemaError, TypeExpr,
    load_config, parse_and_validate, validate_config,
};

// Codegen types
pub use protoforge_codegen::{
    CodecGenerator, CodegenError, EnrichedDocument, ExpandReport, Generator, TemplateEngine,
    TypeScriptCodec, enrich, generate,
};
