use serde_json::{Map, Value};

use crate::spec::{FieldDescriptor, FieldKind, FieldSchema};

/// Generates a JSON schema describing the form values accepted for `schema`.
pub fn generate(schema: &FieldSchema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in &schema.fields {
        // Same rule as `initialize`: a hidden field never replaces a seeded key.
        if field.kind == FieldKind::Hidden && properties.contains_key(&field.name) {
            continue;
        }
        let Some(field_schema) = field_schema(field) else {
            continue;
        };
        properties.insert(field.name.clone(), field_schema);
        if field.required {
            required.push(Value::String(field.name.clone()));
        }
        if field.has_group_text() {
            properties.insert(field.text_key(), object_of(field, "string"));
        }
    }

    let mut root = Map::new();
    root.insert("type".into(), Value::String("object".into()));
    root.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        root.insert("required".into(), Value::Array(required));
    }

    Value::Object(root)
}

fn field_schema(field: &FieldDescriptor) -> Option<Value> {
    let mut schema = Map::new();
    match &field.kind {
        // Files travel as multipart parts, not JSON.
        FieldKind::File => return None,
        FieldKind::Checkbox => {
            schema.insert("type".into(), Value::String("boolean".into()));
        }
        FieldKind::CheckboxGroup => return Some(object_of(field, "boolean")),
        FieldKind::Email => {
            schema.insert("type".into(), Value::String("string".into()));
            schema.insert("format".into(), Value::String("email".into()));
        }
        FieldKind::Date => {
            schema.insert("type".into(), Value::String("string".into()));
            schema.insert("format".into(), Value::String("date".into()));
        }
        FieldKind::Radio | FieldKind::Select if !field.options.is_empty() => {
            schema.insert("type".into(), Value::String("string".into()));
            schema.insert(
                "enum".into(),
                Value::Array(
                    field
                        .options
                        .iter()
                        .map(|option| Value::String(option.value().to_string()))
                        .collect(),
                ),
            );
        }
        _ => {
            schema.insert("type".into(), Value::String("string".into()));
        }
    }
    if let Some(label) = &field.label {
        schema.insert("title".into(), Value::String(label.clone()));
    }
    Some(Value::Object(schema))
}

fn object_of(field: &FieldDescriptor, item_type: &str) -> Value {
    let mut properties = Map::new();
    for sub in &field.subfields {
        let mut entry = Map::new();
        entry.insert("type".into(), Value::String(item_type.into()));
        properties.insert(sub.name.clone(), Value::Object(entry));
    }
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    Value::Object(schema)
}
