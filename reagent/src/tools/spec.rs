//! Capability descriptors sent to the model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// One parameter of a tool: JSON type name, description, required flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl ParameterSpec {
    pub fn required(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(kind, description)
        }
    }
}

/// Parameter schema keyed by parameter name; ordered so prompts and schemas are stable.
pub type ParameterSchema = BTreeMap<String, ParameterSpec>;

/// Tool descriptor: unique name, description, parameter schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

impl ToolSpec {
    /// JSON-Schema object for the parameters, as most chat APIs expect for `tools[].parameters`.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, param) in &self.parameters {
            properties.insert(
                name.clone(),
                json!({ "type": param.kind, "description": param.description }),
            );
            if param.required {
                required.push(Value::String(name.clone()));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}
