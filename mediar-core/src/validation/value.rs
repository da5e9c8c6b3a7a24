//! Call-time value validation and default materialization.
//!
//! Pure functions: inputs are never mutated, materialization returns a new
//! owned value with every missing-but-defaulted field filled in. A value
//! that already passed materialization validates again unchanged.

use std::collections::BTreeMap;

use mediar_spec::MediarError;
use mediar_spec::types::{
    ObjectUnitSchema, OptionsSchema, OptionsValue, PayloadKind, PropSchema, PropSchemaRef,
    ScalarTag, ScalarValue, TypedProp, UnitSchema, UnitValue,
};

fn validation_error(detail: impl Into<String>) -> MediarError {
    MediarError::Validation(detail.into())
}

fn tag_mismatch(name: &str, expected: ScalarTag, got: &ScalarValue) -> MediarError {
    validation_error(format!(
        "field '{name}': expected a {} value, got a {} value",
        expected.as_str(),
        got.tag().as_str()
    ))
}

/// Validate one scalar value against a leaf property schema.
pub fn validate_scalar(
    name: &str,
    prop: &PropSchema,
    value: &ScalarValue,
) -> Result<(), MediarError> {
    match prop {
        PropSchema::Shorthand(tag) => {
            if value.tag() != *tag {
                return Err(tag_mismatch(name, *tag, value));
            }
            Ok(())
        }
        PropSchema::Typed(typed) => validate_typed(name, typed, value),
    }
}

fn validate_typed(name: &str, typed: &TypedProp, value: &ScalarValue) -> Result<(), MediarError> {
    match (typed, value) {
        (TypedProp::String(p), ScalarValue::String(s)) => {
            let len = s.chars().count();
            if p.min_length.is_some_and(|min| len < min)
                || p.max_length.is_some_and(|max| len > max)
            {
                return Err(validation_error(format!(
                    "field '{name}': length {len} violates the declared bounds"
                )));
            }
            Ok(())
        }
        (TypedProp::Binary(p), ScalarValue::Binary(b)) => {
            if p.min_length.is_some_and(|min| b.len() < min)
                || p.max_length.is_some_and(|max| b.len() > max)
            {
                return Err(validation_error(format!(
                    "field '{name}': {} bytes violates the declared bounds",
                    b.len()
                )));
            }
            Ok(())
        }
        (TypedProp::Number(p), ScalarValue::Number(n)) => {
            if p.min.is_some_and(|min| *n < min) || p.max.is_some_and(|max| *n > max) {
                return Err(validation_error(format!(
                    "field '{name}': {n} lies outside the declared bounds"
                )));
            }
            Ok(())
        }
        (TypedProp::Boolean(_), ScalarValue::Bool(_)) => Ok(()),
        (TypedProp::StringUnion(p), ScalarValue::String(s)) => {
            if !p.of.contains(s) {
                return Err(validation_error(format!(
                    "field '{name}': '{s}' is not one of the declared choices"
                )));
            }
            Ok(())
        }
        (typed, value) => Err(tag_mismatch(name, typed.tag(), value)),
    }
}

fn default_of(typed: &TypedProp) -> Option<ScalarValue> {
    match typed {
        TypedProp::String(p) => p.default.clone().map(ScalarValue::String),
        TypedProp::Number(p) => p.default.map(ScalarValue::Number),
        TypedProp::Boolean(p) => p.default.map(ScalarValue::Bool),
        TypedProp::Binary(p) => p.default.clone().map(ScalarValue::Binary),
        TypedProp::StringUnion(p) => p.default.clone().map(ScalarValue::String),
    }
}

fn validate_ref(name: &str, prop: PropSchemaRef<'_>, value: &ScalarValue) -> Result<(), MediarError> {
    match prop {
        PropSchemaRef::Typed(typed) => validate_typed(name, typed, value),
        PropSchemaRef::Schema(schema) => validate_scalar(name, schema, value),
    }
}

fn default_ref(prop: PropSchemaRef<'_>) -> Option<ScalarValue> {
    match prop {
        PropSchemaRef::Typed(typed) => default_of(typed),
        PropSchemaRef::Schema(PropSchema::Typed(typed)) => default_of(typed),
        PropSchemaRef::Schema(PropSchema::Shorthand(_)) => None,
    }
}

/// Materialize an options value: validate every supplied field, reject
/// unknown fields, fill defaults, and require what cannot be defaulted.
pub fn materialize_options(
    schema: &OptionsSchema,
    given: &OptionsValue,
) -> Result<OptionsValue, MediarError> {
    for key in given.keys() {
        if key != "model" && !schema.extra.contains_key(key) {
            return Err(validation_error(format!("unknown option '{key}'")));
        }
    }

    let mut out = OptionsValue::new();
    for (name, prop) in schema.fields() {
        match given.get(name) {
            Some(value) => {
                validate_ref(name, prop, value)?;
                out.insert(name.to_string(), value.clone());
            }
            None => {
                if let Some(default) = default_ref(prop) {
                    out.insert(name.to_string(), default);
                } else if prop.required() {
                    return Err(validation_error(format!(
                        "missing required option '{name}'"
                    )));
                }
            }
        }
    }
    Ok(out)
}

/// Validate an options value without materializing it. Absent fields are
/// acceptable whenever a default exists to stand in for them.
pub fn validate_options(schema: &OptionsSchema, value: &OptionsValue) -> Result<(), MediarError> {
    materialize_options(schema, value).map(drop)
}

/// Materialize a unit value against its schema.
pub fn materialize_unit(schema: &UnitSchema, value: &UnitValue) -> Result<UnitValue, MediarError> {
    match (schema, value) {
        (UnitSchema::Payload(PayloadKind::String), UnitValue::Text(_)) => Ok(value.clone()),
        (UnitSchema::Payload(PayloadKind::Binary), UnitValue::Blob(_)) => Ok(value.clone()),
        (UnitSchema::Payload(kind), _) => Err(validation_error(format!(
            "expected a bare {} payload",
            kind.as_str()
        ))),
        (UnitSchema::Object(object), UnitValue::Object(fields)) => {
            materialize_object_unit(object, fields).map(UnitValue::Object)
        }
        (UnitSchema::Object(object), _) => Err(validation_error(format!(
            "expected an object unit value for unitId '{}'",
            object.id().unwrap_or("?")
        ))),
    }
}

/// Validate a unit value without materializing it.
pub fn validate_unit(schema: &UnitSchema, value: &UnitValue) -> Result<(), MediarError> {
    materialize_unit(schema, value).map(drop)
}

fn materialize_object_unit(
    schema: &ObjectUnitSchema,
    fields: &BTreeMap<String, ScalarValue>,
) -> Result<BTreeMap<String, ScalarValue>, MediarError> {
    for key in fields.keys() {
        if key != "unitId" && key != "payload" && !schema.fields.contains_key(key) {
            return Err(validation_error(format!("unknown unit field '{key}'")));
        }
    }

    let expected_id = schema
        .id()
        .ok_or_else(|| validation_error("unit schema has a malformed unitId"))?;

    let mut out = BTreeMap::new();

    match fields.get("unitId") {
        Some(ScalarValue::String(id)) if id == expected_id => {
            out.insert("unitId".to_string(), ScalarValue::String(id.clone()));
        }
        Some(ScalarValue::String(id)) => {
            return Err(validation_error(format!(
                "unitId '{id}' does not match the declared '{expected_id}'"
            )));
        }
        Some(other) => return Err(tag_mismatch("unitId", ScalarTag::String, other)),
        None => return Err(validation_error("missing required field 'unitId'")),
    }

    match fields.get("payload") {
        Some(value) => {
            let expected = match schema.payload {
                PayloadKind::String => ScalarTag::String,
                PayloadKind::Binary => ScalarTag::Binary,
            };
            if value.tag() != expected {
                return Err(tag_mismatch("payload", expected, value));
            }
            out.insert("payload".to_string(), value.clone());
        }
        None => return Err(validation_error("missing required field 'payload'")),
    }

    for (name, prop) in &schema.fields {
        match fields.get(name) {
            Some(value) => {
                validate_scalar(name, prop, value)?;
                out.insert(name.clone(), value.clone());
            }
            None => {
                if let Some(default) = match prop {
                    PropSchema::Typed(typed) => default_of(typed),
                    PropSchema::Shorthand(_) => None,
                } {
                    out.insert(name.clone(), default);
                } else if prop.required() {
                    return Err(validation_error(format!(
                        "missing required unit field '{name}'"
                    )));
                }
            }
        }
    }

    Ok(out)
}
