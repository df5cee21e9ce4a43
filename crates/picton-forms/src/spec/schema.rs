use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormsError;
use crate::spec::field::FieldDescriptor;

/// Ordered list of field descriptors that drives both authoring and submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FieldSchema {
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names that occur more than once, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut duplicates = Vec::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) && !duplicates.contains(&field.name) {
                duplicates.push(field.name.clone());
            }
        }
        duplicates
    }

    /// Two-space indented JSON, the form stored server-side.
    pub fn to_json_pretty(&self) -> Result<String, FormsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_value(value: Value) -> Result<Self, FormsError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Array(_) => Ok(Self {
                fields: serde_json::from_value(value)
                    .map_err(|err| FormsError::InvalidSchema(err.to_string()))?,
            }),
            Value::Object(_) => serde_json::from_value(value)
                .map_err(|err| FormsError::InvalidSchema(err.to_string())),
            // Stored schemas are sometimes a JSON document encoded as a string.
            Value::String(raw) => parse_schema(&raw),
            other => Err(FormsError::InvalidSchema(format!(
                "expected an object or array, found {}",
                value_kind(&other)
            ))),
        }
    }
}

/// Parses a schema document: `{ "fields": [...] }`, a bare array, or an object
/// without `fields` (treated as empty).
pub fn parse_schema(raw: &str) -> Result<FieldSchema, FormsError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| FormsError::InvalidSchema(err.to_string()))?;
    FieldSchema::from_value(value)
}

/// Like [`parse_schema`] but falls back to an empty schema.
pub fn parse_schema_or_empty(raw: &str) -> FieldSchema {
    match parse_schema(raw) {
        Ok(schema) => schema,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to an empty form schema");
            FieldSchema::default()
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
