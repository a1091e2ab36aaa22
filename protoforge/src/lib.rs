//! # Protoforge
//!
//! Generate multiplayer project scaffolding from a declarative YAML
//! configuration.
//!
//! A project declares its types, methods, authentication, user state and
//! events in `protoforge.yml`. Protoforge validates the document, resolves
//! every type expression into a structured argument graph, generates a
//! TypeScript codec, and expands a Handlebars template tree into the project.
//!
//! ## Quick Start
//!
//! ```ignore
//! use protoforge::prelude::*;
//!
//! let report = Generator::new("my-game")
//!     .templates("templates")
//!     .substitution("module", "game")
//!     .generate()?;
//! println!("{} rendered, {} copied", report.rendered, report.copied);
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Configuration parsing, validation and type resolution
//! - [`codegen`] - Enrichment, codec generation and template expansion
//! - [`cli`] - Command-line arguments

pub mod cli;
pub mod prelude;

/// Configuration parsing, validation and type resolution.
pub mod schema {
    pub use protoforge_schema::*;
}

/// Enrichment, codec generation and template expansion.
pub mod codegen {
    pub use protoforge_codegen::*;
}
