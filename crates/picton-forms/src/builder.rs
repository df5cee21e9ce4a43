//! Schema authoring operations. All of them return a new schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormsError;
use crate::spec::{FieldDescriptor, FieldKind, FieldOption, FieldSchema};

/// Field types offered in the authoring palette, with their display labels.
pub const BUILDER_FIELD_TYPES: &[(FieldKind, &str)] = &[
    (FieldKind::Text, "Text"),
    (FieldKind::Textarea, "Text Area"),
    (FieldKind::Email, "Email"),
    (FieldKind::Number, "Number"),
    (FieldKind::Date, "Date"),
    (FieldKind::Checkbox, "Checkbox"),
    (FieldKind::Radio, "Radio Buttons"),
    (FieldKind::Select, "Dropdown"),
];

/// Partial update merged into an existing descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_width: Option<bool>,
}

impl FieldPatch {
    fn apply(self, field: &mut FieldDescriptor) {
        if let Some(name) = self.name {
            field.name = name;
        }
        if let Some(kind) = self.kind {
            field.kind = kind;
        }
        if let Some(label) = self.label {
            field.label = Some(label);
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(options) = self.options {
            field.options = options;
        }
        if let Some(placeholder) = self.placeholder {
            field.placeholder = Some(placeholder);
        }
        if let Some(default_value) = self.default_value {
            field.default_value = Some(default_value);
        }
        if let Some(full_width) = self.full_width {
            field.full_width = full_width;
        }
    }
}

/// Appends `field_<n+1>`, a required text field.
pub fn add_field(schema: &FieldSchema) -> FieldSchema {
    let ordinal = schema.fields.len() + 1;
    let mut next = schema.clone();
    next.fields.push(
        FieldDescriptor::new(format!("field_{ordinal}"), FieldKind::Text)
            .with_label(format!("Field {ordinal}"))
            .required(),
    );
    next
}

pub fn update_field(
    schema: &FieldSchema,
    index: usize,
    patch: FieldPatch,
) -> Result<FieldSchema, FormsError> {
    let mut next = schema.clone();
    let len = next.fields.len();
    let field = next
        .fields
        .get_mut(index)
        .ok_or(FormsError::FieldIndexOutOfRange { index, len })?;
    patch.apply(field);
    Ok(next)
}

pub fn remove_field(schema: &FieldSchema, index: usize) -> Result<FieldSchema, FormsError> {
    if index >= schema.fields.len() {
        return Err(FormsError::FieldIndexOutOfRange {
            index,
            len: schema.fields.len(),
        });
    }
    let mut next = schema.clone();
    next.fields.remove(index);
    Ok(next)
}

/// Splits a comma separated option list, trimming each entry.
pub fn parse_options_csv(raw: &str) -> Vec<FieldOption> {
    raw.split(',')
        .map(|option| FieldOption::Plain(option.trim().to_string()))
        .collect()
}
