//! Validation and normalization of raw model output.
//!
//! Walks the parsed response against the canonical contract in
//! [`crate::schema`] and produces an immutable [`BrandAnalysis`].
//!
//! One repair is permitted: a bare string where a string array was
//! required is coerced into a singleton array, and the coercion is logged
//! as a normalization event. Everything else either passes or fails.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::analysis::BrandAnalysis;
use crate::schema::{FieldKind, FieldSpec, CONTRACT};

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors produced while validating model output.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The response is not parseable as JSON at all.
    #[error("Response is not valid JSON: {0}")]
    Malformed(String),

    /// A required field is missing, null, or has an incompatible type.
    #[error("Schema violation at field '{field}'")]
    SchemaViolation { field: String },
}

impl ValidationError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn violation(field: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
        }
    }
}

/// Validate and normalize a raw model response into a typed record.
///
/// Unknown extra fields in the payload are ignored; forward compatibility
/// wins over strictness for non-essential schema drift.
pub fn validate(raw: &str) -> ValidationResult<BrandAnalysis> {
    let mut value: Value =
        serde_json::from_str(raw).map_err(|e| ValidationError::malformed(e.to_string()))?;

    if !value.is_object() {
        return Err(ValidationError::malformed(
            "top-level value is not a JSON object",
        ));
    }

    prune_unjustified_matches(&mut value)?;

    let root = value.as_object_mut().expect("checked above");
    for spec in CONTRACT {
        check_field(root, spec, "")?;
    }

    serde_json::from_value(value)
        .map_err(|e| ValidationError::malformed(format!("normalized payload rejected: {e}")))
}

/// Drop `marcas_match` entries without a usable justification.
///
/// Individual unjustified entries are dropped (and logged) rather than
/// failing the record; a list left empty fails the whole record because
/// it is useless to downstream consumers.
fn prune_unjustified_matches(value: &mut Value) -> ValidationResult<()> {
    let Some(entries) = value
        .get_mut("marcas_match")
        .and_then(Value::as_array_mut)
    else {
        // Missing or mistyped; the contract walk reports it.
        return Ok(());
    };

    let before = entries.len();
    entries.retain(|entry| {
        entry
            .get("justificativa")
            .and_then(Value::as_str)
            .is_some_and(|j| !j.trim().is_empty())
    });

    let dropped = before - entries.len();
    if dropped > 0 {
        warn!(
            dropped,
            remaining = entries.len(),
            "dropped marcas_match entries without a justification"
        );
    }

    if entries.is_empty() {
        return Err(ValidationError::violation("marcas_match"));
    }

    Ok(())
}

fn check_field(
    obj: &mut serde_json::Map<String, Value>,
    spec: &FieldSpec,
    prefix: &str,
) -> ValidationResult<()> {
    let path = if prefix.is_empty() {
        spec.name.to_string()
    } else {
        format!("{prefix}.{}", spec.name)
    };

    let value = match obj.get_mut(spec.name) {
        None | Some(Value::Null) => {
            if spec.required {
                return Err(ValidationError::violation(path));
            }
            return Ok(());
        }
        Some(v) => v,
    };

    match spec.kind {
        FieldKind::Text => {
            if !value.is_string() {
                return Err(ValidationError::violation(path));
            }
        }
        FieldKind::TextArray => {
            if value.is_string() {
                // The one permitted repair: models occasionally under-nest.
                warn!(field = %path, "normalized bare string into singleton array");
                let scalar = value.take();
                *value = Value::Array(vec![scalar]);
            }
            let Some(items) = value.as_array() else {
                return Err(ValidationError::violation(path));
            };
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(ValidationError::violation(format!("{path}[{i}]")));
                }
            }
        }
        FieldKind::Object(fields) => {
            let Some(nested) = value.as_object_mut() else {
                return Err(ValidationError::violation(path));
            };
            for nested_spec in fields {
                check_field(nested, nested_spec, &path)?;
            }
        }
        FieldKind::ObjectArray(fields) => {
            let Some(entries) = value.as_array_mut() else {
                return Err(ValidationError::violation(path));
            };
            for (i, entry) in entries.iter_mut().enumerate() {
                let entry_path = format!("{path}[{i}]");
                let Some(nested) = entry.as_object_mut() else {
                    return Err(ValidationError::violation(entry_path));
                };
                for nested_spec in fields {
                    check_field(nested, nested_spec, &entry_path)?;
                }
            }
        }
    }

    Ok(())
}
