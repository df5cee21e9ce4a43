use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::FieldSchema;
use crate::values::FormValues;

pub const REQUIRED_FIELDS_NOTICE: &str = "Please fill in all required fields";
pub const PETITION_EXPLANATION_NOTICE: &str = "Please provide an explanation for your petition";

/// Makes `required` mandatory whenever `when_field` holds `equals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionalRequirement {
    pub when_field: String,
    pub equals: String,
    pub required: String,
    pub message: String,
}

impl ConditionalRequirement {
    /// `petition_purpose == "other"` requires `petition_explanation`.
    pub fn petition_explanation() -> Self {
        Self {
            when_field: "petition_purpose".into(),
            equals: "other".into(),
            required: "petition_explanation".into(),
            message: PETITION_EXPLANATION_NOTICE.into(),
        }
    }

    /// Only applies to schemas that declare both fields.
    fn applies_to(&self, schema: &FieldSchema) -> bool {
        schema.has_field(&self.when_field) && schema.has_field(&self.required)
    }

    fn triggered(&self, values: &FormValues) -> bool {
        values.text(&self.when_field) == Some(self.equals.as_str())
    }
}

/// Validation error metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    pub field: String,
    pub path: String,
    pub message: String,
    pub code: String,
}

/// Outcome of [`validate`]. Failures are values, never panics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Short message suitable for a toast or stderr.
    pub fn notice(&self) -> Option<&str> {
        if self.valid {
            return None;
        }
        if !self.missing_required.is_empty() {
            return Some(REQUIRED_FIELDS_NOTICE);
        }
        self.errors.first().map(|error| error.message.as_str())
    }
}

pub fn default_rules() -> Vec<ConditionalRequirement> {
    vec![ConditionalRequirement::petition_explanation()]
}

/// Required-field check plus the built-in conditional rules.
pub fn validate(schema: &FieldSchema, values: &FormValues) -> ValidationReport {
    validate_with_rules(schema, values, &default_rules())
}

pub fn validate_with_rules(
    schema: &FieldSchema,
    values: &FormValues,
    rules: &[ConditionalRequirement],
) -> ValidationReport {
    let mut missing_required = Vec::new();
    for field in &schema.fields {
        if field.required && !values.is_filled(&field.name) {
            missing_required.push(field.name.clone());
        }
    }

    let mut errors = Vec::new();
    for rule in rules {
        if !rule.applies_to(schema) || !rule.triggered(values) {
            continue;
        }
        if values.is_filled(&rule.required) || missing_required.contains(&rule.required) {
            continue;
        }
        errors.push(ValidationError {
            field: rule.required.clone(),
            path: format!("/{}", rule.required),
            message: rule.message.clone(),
            code: "conditional_required".into(),
        });
    }

    ValidationReport {
        valid: missing_required.is_empty() && errors.is_empty(),
        missing_required,
        errors,
    }
}
