//! Schema enrichment.
//!
//! Extends a validated configuration with synthesized types, builds the
//! named-type IR for the codec generator, and resolves the [`Arg`] graphs
//! templates need.

use crate::codec::{ChildType, CodecGenerator, CodecType, CodecTypes, FieldType, Modifier};
use crate::error::CodegenError;
use indexmap::IndexMap;
use protoforge_schema::{
    Arg, Config, PrimitiveKind, Resolver, SchemaError, TypeExpr, TypeTable, request_type_name,
    sanitize_field_name,
};
use serde_json::{Map, Value};

/// Built-in user identifier type.
pub const USER_ID_TYPE: &str = "UserId";

/// Built-in request type of the initialize call.
pub const INITIALIZE_REQUEST_TYPE: &str = "IInitializeRequest";

/// Event name used when the configuration declares no events.
pub const DEFAULT_EVENT: &str = "default";

/// Configuration extended with everything templates render from.
#[derive(Debug, Clone)]
pub struct EnrichedDocument {
    /// Configuration whose type table includes the synthesized types.
    pub config: Config,
    /// Named-type IR for the codec generator.
    pub codec_types: CodecTypes,
    /// Source text produced by the codec generator.
    pub delta_pack: String,
    /// Resolved initialization arguments.
    pub initialize_args: Arg,
    /// Resolved error type.
    pub error: Arg,
    /// Resolved request type of every method.
    pub requests: IndexMap<String, Arg>,
    /// Plugin-owned type names.
    pub plugins: Vec<String>,
    /// Application name.
    pub app_name: String,
    /// Resolved type of every event.
    pub events: IndexMap<String, Arg>,
}

impl EnrichedDocument {
    /// Runs a codec generator over the named types and stores its output.
    ///
    /// # Errors
    /// Returns `CodegenError` if the codec generator fails.
    pub fn render_codec(&mut self, codec: &dyn CodecGenerator) -> Result<(), CodegenError> {
        self.delta_pack = codec.generate(&self.codec_types)?;
        tracing::debug!(
            "Generated {} codec for {} types ({} bytes)",
            codec.target(),
            self.codec_types.len(),
            self.delta_pack.len()
        );
        Ok(())
    }

    /// Builds the template context: every configuration key, with `error`
    /// and `events` replaced by their resolved forms, plus the derived keys.
    ///
    /// # Errors
    /// Returns `CodegenError::Context` if serialization fails.
    pub fn to_context(&self) -> Result<Value, CodegenError> {
        let mut context = match serde_json::to_value(&self.config)? {
            Value::Object(map) => map,
            _ => return Err(CodegenError::generation("configuration is not an object")),
        };

        context.insert("deltaPack".to_string(), Value::String(self.delta_pack.clone()));
        context.insert(
            "initializeArgs".to_string(),
            serde_json::to_value(&self.initialize_args)?,
        );
        context.insert("error".to_string(), serde_json::to_value(&self.error)?);
        context.insert("requests".to_string(), serde_json::to_value(&self.requests)?);
        context.insert("plugins".to_string(), serde_json::to_value(&self.plugins)?);
        context.insert("appName".to_string(), Value::String(self.app_name.clone()));
        context.insert("events".to_string(), serde_json::to_value(&self.events)?);

        Ok(Value::Object(context))
    }

    /// Builds the template context with path substitutions merged on top.
    ///
    /// # Errors
    /// Returns `CodegenError::Context` if serialization fails.
    pub fn to_context_with(
        &self,
        substitutions: &IndexMap<String, String>,
    ) -> Result<Value, CodegenError> {
        let mut context = self.to_context()?;
        if let Value::Object(map) = &mut context {
            merge_strings(map, substitutions);
        }
        Ok(context)
    }
}

fn merge_strings(map: &mut Map<String, Value>, values: &IndexMap<String, String>) {
    for (key, value) in values {
        map.insert(key.clone(), Value::String(value.clone()));
    }
}

/// Enriches a validated configuration.
///
/// The caller's configuration is not modified; the synthesized types are
/// added to a copy of its type table.
///
/// # Arguments
/// * `config` - Validated configuration
/// * `plugins` - Plugin-owned type names
/// * `app_name` - Application name
///
/// # Errors
/// Returns `SchemaError` if a type reference cannot be resolved.
pub fn enrich(
    config: &Config,
    plugins: &[String],
    app_name: &str,
) -> Result<EnrichedDocument, SchemaError> {
    let mut config = config.clone();
    extend_type_table(&mut config);

    let codec_types = build_codec_types(&config.types)?;

    let resolver = Resolver::new(&config.types, plugins);
    let initialize_args = resolver.resolve(&TypeExpr::empty_object(), false)?;
    let error = resolver.resolve_str(&config.error, false)?;

    let requests = config
        .methods
        .keys()
        .map(|method| {
            let arg = resolver.resolve_str(&request_type_name(method), false)?;
            Ok((method.clone(), arg))
        })
        .collect::<Result<IndexMap<_, _>, SchemaError>>()?;

    let events = match &config.events {
        Some(events) => events
            .iter()
            .map(|(name, ty)| Ok((name.clone(), resolver.resolve_str(ty, false)?)))
            .collect::<Result<IndexMap<_, _>, SchemaError>>()?,
        None => IndexMap::from([(
            DEFAULT_EVENT.to_string(),
            resolver.resolve_str(PrimitiveKind::String.keyword(), false)?,
        )]),
    };

    tracing::debug!(
        "Enriched {}: {} types, {} methods, {} events",
        app_name,
        config.types.len(),
        requests.len(),
        events.len()
    );

    Ok(EnrichedDocument {
        config,
        codec_types,
        delta_pack: String::new(),
        initialize_args,
        error,
        requests,
        plugins: plugins.to_vec(),
        app_name: app_name.to_string(),
        events,
    })
}

/// Adds the built-in types and one request type per method.
fn extend_type_table(config: &mut Config) {
    config.types.insert(
        USER_ID_TYPE.to_string(),
        TypeExpr::name(PrimitiveKind::String.keyword()),
    );
    config
        .types
        .insert(INITIALIZE_REQUEST_TYPE.to_string(), TypeExpr::empty_object());

    for (method, args) in &config.methods {
        let request = match args {
            Some(args) => TypeExpr::object(args.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
            None => TypeExpr::empty_object(),
        };
        config.types.insert(request_type_name(method), request);
    }
}

/// Builds the named-type IR for every entry of a type table.
///
/// # Errors
/// Returns `SchemaError::InvalidPrimitiveType` for references that are
/// neither declared nor primitive (including nested modifiers such as
/// `int[][]`), and `SchemaError::InvalidType` for object fields that are not
/// type names.
pub fn build_codec_types(types: &TypeTable) -> Result<CodecTypes, SchemaError> {
    types
        .iter()
        .map(|(name, expr)| Ok((name.clone(), build_codec_type(types, name, expr)?)))
        .collect()
}

fn build_codec_type(
    types: &TypeTable,
    name: &str,
    expr: &TypeExpr,
) -> Result<CodecType, SchemaError> {
    match expr {
        TypeExpr::Name(target) => match base_type(types, target)? {
            FieldType::Primitive(kind) => Ok(CodecType::Primitive(kind)),
            FieldType::Reference(target) => Ok(CodecType::Reference(target)),
        },
        TypeExpr::List(items) if items.iter().all(|item| types.contains_key(item)) => {
            Ok(CodecType::Union(items.clone()))
        }
        TypeExpr::List(labels) => Ok(CodecType::Enum(labels.clone())),
        TypeExpr::Object(fields) => {
            let fields = fields
                .iter()
                .map(|(field, ty)| {
                    let TypeExpr::Name(ty) = ty else {
                        return Err(SchemaError::invalid_type(
                            name,
                            format!("field '{field}' must be a type name, got a {}", ty.shape()),
                        ));
                    };
                    Ok((sanitize_field_name(field), child_type(types, ty)?))
                })
                .collect::<Result<IndexMap<_, _>, SchemaError>>()?;
            Ok(CodecType::Object(fields))
        }
    }
}

/// Splits off one trailing modifier; deeper nesting is left in the base and
/// rejected there.
fn child_type(types: &TypeTable, ty: &str) -> Result<ChildType, SchemaError> {
    if let Some(base) = ty.strip_suffix('?') {
        Ok(ChildType::with_modifier(
            base_type(types, base)?,
            Modifier::Optional,
        ))
    } else if let Some(base) = ty.strip_suffix("[]") {
        Ok(ChildType::with_modifier(
            base_type(types, base)?,
            Modifier::Array,
        ))
    } else {
        Ok(ChildType::new(base_type(types, ty)?))
    }
}

fn base_type(types: &TypeTable, name: &str) -> Result<FieldType, SchemaError> {
    if types.contains_key(name) {
        Ok(FieldType::Reference(name.to_string()))
    } else if let Some(kind) = PrimitiveKind::from_keyword(name) {
        Ok(FieldType::Primitive(kind))
    } else {
        Err(SchemaError::invalid_primitive(name))
    }
}
