//! Configuration validation utilities.
//!
//! Decoding already rejects unknown keys and wrong shapes; this module checks
//! the value constraints a shape cannot express.

use crate::error::SchemaError;
use crate::ir::sanitize_field_name;
use crate::types::{Config, TypeExpr};
use std::collections::HashSet;

/// Minimum accepted tick period in milliseconds.
pub const MIN_TICK_MS: i64 = 25;

/// Validates a decoded configuration for correctness.
///
/// # Arguments
/// * `config` - The configuration to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_config(config: &Config) -> Result<(), SchemaError> {
    validate_tick(config)?;
    validate_events(config)?;
    validate_user_state(config)?;
    validate_field_names(config)?;
    Ok(())
}

fn validate_tick(config: &Config) -> Result<(), SchemaError> {
    match config.tick {
        Some(tick) if tick < MIN_TICK_MS => Err(SchemaError::validation(
            "tick",
            format!("must be greater than or equal to {MIN_TICK_MS}, got {tick}"),
        )),
        _ => Ok(()),
    }
}

fn validate_events(config: &Config) -> Result<(), SchemaError> {
    match &config.events {
        Some(events) if events.is_empty() => Err(SchemaError::validation(
            "events",
            "must have at least one key, if you do not intend to use events you can safely remove this key",
        )),
        _ => Ok(()),
    }
}

fn validate_user_state(config: &Config) -> Result<(), SchemaError> {
    if config.has_type(&config.user_state) {
        Ok(())
    } else {
        Err(SchemaError::MissingUserState {
            name: config.user_state.clone(),
        })
    }
}

/// Checks that every object type and method argument mapping keeps unique,
/// non-empty field names once non-word characters are stripped.
fn validate_field_names(config: &Config) -> Result<(), SchemaError> {
    for (name, expr) in &config.types {
        if let TypeExpr::Object(fields) = expr {
            check_unique(name, fields.keys())?;
        }
    }

    for (name, args) in &config.methods {
        if let Some(args) = args {
            check_unique(name, args.keys())?;
        }
    }

    Ok(())
}

fn check_unique<'a>(
    owner: &str,
    fields: impl Iterator<Item = &'a String>,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in fields {
        let sanitized = sanitize_field_name(field);
        if sanitized.is_empty() {
            return Err(SchemaError::validation(
                format!("{owner}.{field}"),
                "has no word characters left after sanitizing",
            ));
        }
        if !seen.insert(sanitized.clone()) {
            return Err(SchemaError::DuplicateField {
                owner: owner.to_string(),
                field: sanitized,
            });
        }
    }
    Ok(())
}
