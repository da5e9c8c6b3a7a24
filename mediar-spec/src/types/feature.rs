//! Capability query objects.
//!
//! A `Requirement` names one transformation/IO shape a consumer needs; a
//! `Feature` groups requirements that together make a consumer-visible
//! capability work. Both are pure query data, never mutated after
//! construction and never evaluated here — the matcher lives in
//! `mediar-registry`.

use serde::{Deserialize, Serialize};

use super::io::TransformationIo;

/// One transformation/IO shape a consumer needs from some connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub description: String,
    pub schema: TransformationIo,
    /// Whether the enclosing feature is unusable without this requirement.
    #[serde(default)]
    pub required: bool,
}

impl Requirement {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        schema: TransformationIo,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            schema,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A consumer capability: satisfied when every required requirement is
/// covered by at least one connector of the evaluated set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub description: String,
    pub requirements: Vec<Requirement>,
}

impl Feature {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            requirements: Vec::new(),
        }
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::io::Transformation;

    #[test]
    fn required_defaults_to_false_on_the_wire() {
        let json = r#"{
            "id": "chat",
            "description": "plain chat",
            "schema": { "type": "textToText", "io": {} }
        }"#;
        let de: Requirement = serde_json::from_str(json).unwrap();
        assert!(!de.required);
        assert_eq!(de.schema.transformation, Transformation::TextToText);
    }
}
