//! Template tree expansion.
//!
//! Walks a template directory and mirrors it into an output directory.
//! `{{token}}` in directory names is substituted. `.hbs` files are rendered
//! against the template context and every other file is copied verbatim.
//! File names are kept as they are.
//!
//! Writes go straight to the output tree. A failure part-way through leaves
//! the files written so far in place.

use crate::error::CodegenError;
use handlebars::{Handlebars, handlebars_helper, no_escape};
use indexmap::IndexMap;
use protoforge_schema::{capitalize, request_type_name};
use regex::{Captures, Regex};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Extension marking files that are rendered instead of copied.
pub const TEMPLATE_EXTENSION: &str = ".hbs";

static PATH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("path token pattern is valid"));

handlebars_helper!(capitalize_helper: |s: str| capitalize(s));
handlebars_helper!(uppercase_helper: |s: str| s.to_uppercase());
handlebars_helper!(lowercase_helper: |s: str| s.to_lowercase());
handlebars_helper!(json_helper: |v: Json| v.to_string());
handlebars_helper!(request_name_helper: |s: str| request_type_name(s));

/// Counts of what an expansion produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandReport {
    /// Template files rendered.
    pub rendered: usize,
    /// Files copied verbatim.
    pub copied: usize,
}

/// Template tree renderer.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Creates an engine with the built-in helpers registered.
    ///
    /// Output is not HTML-escaped: `{{value}}` renders like `{{{value}}}`.
    /// Templates written for an escaping Handlebars renderer produce raw
    /// `<`, `>`, `&` and quotes here instead of HTML entities.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.register_helper("capitalize", Box::new(capitalize_helper));
        registry.register_helper("uppercase", Box::new(uppercase_helper));
        registry.register_helper("lowercase", Box::new(lowercase_helper));
        registry.register_helper("json", Box::new(json_helper));
        registry.register_helper("requestName", Box::new(request_name_helper));
        Self { registry }
    }

    /// Renders a template string against a context.
    ///
    /// # Errors
    /// Returns `handlebars::RenderError` if the template does not compile or render.
    pub fn render(&self, template: &str, context: &Value) -> Result<String, handlebars::RenderError> {
        self.registry.render_template(template, context)
    }

    /// Expands a template tree into an output tree.
    ///
    /// # Arguments
    /// * `template_root` - Directory holding the templates
    /// * `output_root` - Directory receiving the generated files
    /// * `context` - Data every template renders against
    /// * `substitutions` - Values for `{{token}}` in directory names
    ///
    /// # Errors
    /// Returns `CodegenError` on the first IO or render failure. Files
    /// written before the failure are left on disk.
    pub fn expand(
        &self,
        template_root: &Path,
        output_root: &Path,
        context: &Value,
        substitutions: &IndexMap<String, String>,
    ) -> Result<ExpandReport, CodegenError> {
        let mut report = ExpandReport::default();
        self.expand_dir(template_root, output_root, context, substitutions, &mut report)?;
        tracing::info!(
            "Expanded {} into {}: {} rendered, {} copied",
            template_root.display(),
            output_root.display(),
            report.rendered,
            report.copied
        );
        Ok(report)
    }

    fn expand_dir(
        &self,
        in_dir: &Path,
        out_dir: &Path,
        context: &Value,
        substitutions: &IndexMap<String, String>,
        report: &mut ExpandReport,
    ) -> Result<(), CodegenError> {
        let mut entries = fs::read_dir(in_dir)
            .map_err(|e| CodegenError::io(in_dir, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CodegenError::io(in_dir, e))?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let metadata = fs::metadata(&path).map_err(|e| CodegenError::io(&path, e))?;

            if metadata.is_dir() {
                let out_name = substitute_tokens(&name, substitutions);
                self.expand_dir(&path, &out_dir.join(out_name), context, substitutions, report)?;
            } else if let Some(stem) = name.strip_suffix(TEMPLATE_EXTENSION) {
                let out_path = out_dir.join(stem);
                let source = fs::read_to_string(&path).map_err(|e| CodegenError::io(&path, e))?;
                let rendered = self
                    .render(&source, context)
                    .map_err(|source| CodegenError::Render {
                        path: path.clone(),
                        source,
                    })?;
                write_file(&out_path, rendered.as_bytes())?;
                tracing::debug!("Rendered {} -> {}", path.display(), out_path.display());
                report.rendered += 1;
            } else {
                let out_path = out_dir.join(&name);
                ensure_parent(&out_path)?;
                fs::copy(&path, &out_path).map_err(|e| CodegenError::io(&out_path, e))?;
                tracing::debug!("Copied {} -> {}", path.display(), out_path.display());
                report.copied += 1;
            }
        }

        Ok(())
    }
}

/// Replaces every `{{token}}` in a directory name with its substitution, or
/// with nothing when the token has no value.
#[must_use]
pub fn substitute_tokens(segment: &str, substitutions: &IndexMap<String, String>) -> String {
    PATH_TOKEN
        .replace_all(segment, |caps: &Captures<'_>| {
            let token = &caps[1];
            match substitutions.get(token) {
                Some(value) => value.clone(),
                None => {
                    tracing::warn!("No substitution for path token '{}' in '{}'", token, segment);
                    String::new()
                }
            }
        })
        .into_owned()
}

fn ensure_parent(path: &Path) -> Result<(), CodegenError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), CodegenError> {
    ensure_parent(path)?;
    fs::write(path, contents).map_err(|e| CodegenError::io(path, e))
}
