//! End-to-end generation pipeline.
//!
//! Reads a project's configuration, validates and enriches it, runs the
//! codec generator, and expands a template tree into the project.

use crate::codec::CodecGenerator;
use crate::enrich::{EnrichedDocument, enrich};
use crate::error::CodegenError;
use crate::template::{ExpandReport, TemplateEngine};
use crate::typescript::TypeScriptCodec;
use indexmap::IndexMap;
use protoforge_schema::{load_config, validate_config};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name at the project root.
pub const CONFIG_FILE_NAME: &str = "protoforge.yml";

/// Plugin directory, relative to the project root.
pub const PLUGINS_DIR: &str = "client/prototype-ui/plugins";

/// Code generation pipeline for one project.
pub struct Generator {
    root: PathBuf,
    templates: Option<PathBuf>,
    output: Option<PathBuf>,
    substitutions: IndexMap<String, String>,
    codec: Box<dyn CodecGenerator>,
}

impl Generator {
    /// Creates a generator for the project at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            templates: None,
            output: None,
            substitutions: IndexMap::new(),
            codec: Box::new(TypeScriptCodec::new()),
        }
    }

    /// Sets the template tree to expand.
    #[must_use]
    pub fn templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates = Some(dir.into());
        self
    }

    /// Sets the output directory. Defaults to the project root.
    #[must_use]
    pub fn output(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output = Some(dir.into());
        self
    }

    /// Adds a path substitution, also visible to templates.
    #[must_use]
    pub fn substitution(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(key.into(), value.into());
        self
    }

    /// Adds several path substitutions.
    #[must_use]
    pub fn substitutions<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.substitutions
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replaces the codec generator.
    #[must_use]
    pub fn codec(mut self, codec: impl CodecGenerator + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    /// Returns the project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads, validates and enriches the project configuration.
    ///
    /// # Errors
    /// Returns `CodegenError` if the configuration cannot be read, is
    /// invalid, or references unknown types.
    pub fn load(&self) -> Result<EnrichedDocument, CodegenError> {
        let config_path = self.root.join(CONFIG_FILE_NAME);
        let config = load_config(&config_path)?;
        validate_config(&config)?;

        let plugins = discover_plugins(&self.root)?;
        let app_name = app_name(&self.root)?;
        tracing::info!(
            "Loaded {} for {} ({} plugins)",
            config_path.display(),
            app_name,
            plugins.len()
        );

        let mut doc = enrich(&config, &plugins, &app_name)?;
        doc.render_codec(self.codec.as_ref())?;
        Ok(doc)
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    /// Returns `CodegenError` if no template tree is set, or if loading or
    /// expansion fails. Expansion failures may leave partial output.
    pub fn generate(&self) -> Result<ExpandReport, CodegenError> {
        let templates = self
            .templates
            .as_deref()
            .ok_or_else(|| CodegenError::generation("no template directory configured"))?;
        let output = self.output.as_deref().unwrap_or(&self.root);

        let doc = self.load()?;
        let context = doc.to_context_with(&self.substitutions)?;
        TemplateEngine::new().expand(templates, output, &context, &self.substitutions)
    }
}

/// Generates a project from a template tree.
///
/// # Arguments
/// * `root_dir` - Project root holding the configuration file
/// * `templates_dir` - Template tree to expand into the project root
/// * `substitutions` - Path token values, also visible to templates
///
/// # Errors
/// Returns `CodegenError` if any stage fails.
pub fn generate(
    root_dir: &Path,
    templates_dir: &Path,
    substitutions: &IndexMap<String, String>,
) -> Result<ExpandReport, CodegenError> {
    Generator::new(root_dir)
        .templates(templates_dir)
        .substitutions(substitutions.clone())
        .generate()
}

/// Lists plugin names: every entry of the plugin directory, truncated at
/// its first `.`. A missing directory means no plugins.
///
/// # Errors
/// Returns `CodegenError::Io` if the directory exists but cannot be read.
pub fn discover_plugins(root: &Path) -> Result<Vec<String>, CodegenError> {
    let dir = root.join(PLUGINS_DIR);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut plugins = Vec::new();
    for entry in fs::read_dir(&dir).map_err(|e| CodegenError::io(&dir, e))? {
        let entry = entry.map_err(|e| CodegenError::io(&dir, e))?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        let name = file_name.split('.').next().unwrap_or_default();
        if !name.is_empty() {
            plugins.push(name.to_string());
        }
    }
    plugins.sort();
    plugins.dedup();

    tracing::debug!("Discovered plugins in {}: {:?}", dir.display(), plugins);
    Ok(plugins)
}

/// Returns the application name: the project directory's base name.
///
/// # Errors
/// Returns `CodegenError` if the root cannot be canonicalized or has no name.
pub fn app_name(root: &Path) -> Result<String, CodegenError> {
    let root = fs::canonicalize(root).map_err(|e| CodegenError::io(root, e))?;
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CodegenError::generation(format!("cannot derive an app name from {}", root.display()))
        })
}
