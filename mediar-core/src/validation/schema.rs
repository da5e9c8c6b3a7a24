//! Load-time well-formedness checks for connector schemas.
//!
//! Every check here produces a `SchemaDefinition` error and runs before an
//! adapter materializes; a connector that fails any of them never becomes
//! callable.

use std::collections::BTreeMap;

use mediar_spec::MediarError;
use mediar_spec::types::{
    ConnectorSchema, ObjectUnitSchema, OptionsSchema, PropSchema, TypedProp, UnitSchema,
};

fn definition_error(detail: impl Into<String>) -> MediarError {
    MediarError::SchemaDefinition(detail.into())
}

/// Check one leaf property schema.
pub fn check_prop(name: &str, prop: &PropSchema) -> Result<(), MediarError> {
    let PropSchema::Typed(typed) = prop else {
        return Ok(());
    };

    if typed.required() && typed.has_default() {
        return Err(definition_error(format!(
            "field '{name}' is required and carries a default; a defaulted field need never be supplied, so the combination is contradictory"
        )));
    }

    match typed {
        TypedProp::String(p) => {
            check_length_bounds(name, p.min_length, p.max_length)?;
            if let Some(default) = &p.default {
                check_chars_within(name, default, p.min_length, p.max_length)?;
            }
        }
        TypedProp::Binary(p) => {
            check_length_bounds(name, p.min_length, p.max_length)?;
            if let Some(default) = &p.default
                && !within(default.len(), p.min_length, p.max_length)
            {
                return Err(definition_error(format!(
                    "field '{name}': default of {} bytes violates its own length bounds",
                    default.len()
                )));
            }
        }
        TypedProp::Number(p) => {
            if let (Some(min), Some(max)) = (p.min, p.max)
                && min > max
            {
                return Err(definition_error(format!(
                    "field '{name}': min {min} exceeds max {max}"
                )));
            }
            if let Some(default) = p.default
                && (p.min.is_some_and(|min| default < min)
                    || p.max.is_some_and(|max| default > max))
            {
                return Err(definition_error(format!(
                    "field '{name}': default {default} lies outside its own bounds"
                )));
            }
        }
        TypedProp::StringUnion(p) => {
            check_union_literals(name, &p.of)?;
            if let Some(default) = &p.default
                && !p.of.contains(default)
            {
                return Err(definition_error(format!(
                    "field '{name}': default '{default}' is not a member of its union"
                )));
            }
        }
        TypedProp::Boolean(_) => {}
    }

    Ok(())
}

fn check_length_bounds(
    name: &str,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<(), MediarError> {
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(definition_error(format!(
            "field '{name}': minLength {min} exceeds maxLength {max}"
        )));
    }
    Ok(())
}

fn check_chars_within(
    name: &str,
    value: &str,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<(), MediarError> {
    if !within(value.chars().count(), min, max) {
        return Err(definition_error(format!(
            "field '{name}': default violates its own length bounds"
        )));
    }
    Ok(())
}

fn within(len: usize, min: Option<usize>, max: Option<usize>) -> bool {
    min.is_none_or(|min| len >= min) && max.is_none_or(|max| len <= max)
}

fn check_union_literals(name: &str, of: &[String]) -> Result<(), MediarError> {
    if of.is_empty() {
        return Err(definition_error(format!(
            "field '{name}': string union 'of' list is empty"
        )));
    }
    for (index, literal) in of.iter().enumerate() {
        if of[..index].contains(literal) {
            return Err(definition_error(format!(
                "field '{name}': string union lists '{literal}' more than once"
            )));
        }
    }
    Ok(())
}

/// Check one unit schema. For object units this covers the `unitId`
/// identity invariant and every metadata field.
pub fn check_unit(unit: &UnitSchema) -> Result<(), MediarError> {
    let Some(object) = unit.as_object() else {
        return Ok(());
    };

    match &object.unit_id {
        TypedProp::StringUnion(union) => {
            if !union.required {
                return Err(definition_error("unitId must be marked required"));
            }
            if union.default.is_some() {
                return Err(definition_error("unitId cannot carry a default"));
            }
            if union.of.len() != 1 {
                return Err(definition_error(format!(
                    "unitId must be a union over exactly one literal, got {}",
                    union.of.len()
                )));
            }
            if union.of[0].is_empty() {
                return Err(definition_error("unitId literal is empty"));
            }
        }
        other => {
            return Err(definition_error(format!(
                "unitId must be a string union, got a {} schema",
                other.tag().as_str()
            )));
        }
    }

    for (name, prop) in &object.fields {
        if name.is_empty() {
            return Err(definition_error("object unit declares a field with an empty name"));
        }
        check_prop(name, prop)?;
    }

    Ok(())
}

/// Check an options schema: `model` must be a required string union with
/// no default, and every member must be well formed.
pub fn check_options(options: &OptionsSchema) -> Result<(), MediarError> {
    match &options.model {
        TypedProp::StringUnion(union) => {
            if !union.required {
                return Err(definition_error(
                    "options schema: 'model' must be marked required",
                ));
            }
            if union.default.is_some() {
                return Err(definition_error(
                    "options schema: 'model' is required and cannot carry a default",
                ));
            }
            check_union_literals("model", &union.of)?;
        }
        other => {
            return Err(definition_error(format!(
                "options schema: 'model' must be a string union, got a {} schema",
                other.tag().as_str()
            )));
        }
    }

    for (name, prop) in &options.extra {
        if name.is_empty() {
            return Err(definition_error("options schema declares a field with an empty name"));
        }
        check_prop(name, prop)?;
    }

    Ok(())
}

/// Tracks every `unitId` literal observed during a load, enforcing the
/// one-literal-one-structure invariant. Structurally identical re-use of a
/// unit across pairs and connectors is the same unit; any divergence under
/// one literal is a definition error.
#[derive(Debug, Clone, Default)]
pub struct UnitIndex {
    seen: BTreeMap<String, ObjectUnitSchema>,
}

impl UnitIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one object unit, rejecting a conflicting structure under an
    /// already-seen literal.
    pub fn observe(&mut self, unit: &ObjectUnitSchema) -> Result<(), MediarError> {
        let id = unit
            .id()
            .ok_or_else(|| definition_error("object unit has a malformed unitId"))?;

        match self.seen.get(id) {
            Some(known) if known != unit => Err(definition_error(format!(
                "unitId '{id}' is declared with two different structures"
            ))),
            Some(_) => Ok(()),
            None => {
                self.seen.insert(id.to_string(), unit.clone());
                Ok(())
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains_key(id)
    }
}

/// Check a whole connector schema, recording its object units into the
/// given index so unit identity can be enforced across several connectors
/// loaded together.
pub fn check_connector_with(
    connector: &ConnectorSchema,
    units: &mut UnitIndex,
) -> Result<(), MediarError> {
    if connector.id.is_empty() {
        return Err(definition_error("connector id is empty"));
    }

    for (index, key) in connector.keys.iter().enumerate() {
        if key.key.is_empty() {
            return Err(definition_error(format!(
                "connector '{}' declares a key with an empty name",
                connector.id
            )));
        }
        if connector.keys[..index].iter().any(|k| k.key == key.key) {
            return Err(definition_error(format!(
                "connector '{}' declares key '{}' more than once",
                connector.id, key.key
            )));
        }
    }

    check_options(&connector.options)?;

    for (index, io) in connector.supported_io.iter().enumerate() {
        if connector.supported_io[..index]
            .iter()
            .any(|other| other.transformation == io.transformation)
        {
            return Err(definition_error(format!(
                "connector '{}' declares transformation '{}' more than once",
                connector.id, io.transformation
            )));
        }
        for pairs in io.io.values() {
            for pair in pairs {
                for side in [pair.input(), pair.output()] {
                    check_unit(side.unit())?;
                    if let Some(object) = side.unit().as_object() {
                        units.observe(object)?;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Check a single connector schema in isolation.
pub fn check_connector(connector: &ConnectorSchema) -> Result<(), MediarError> {
    check_connector_with(connector, &mut UnitIndex::new())
}
