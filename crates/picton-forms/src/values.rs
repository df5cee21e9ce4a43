use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::error::FormsError;
use crate::spec::{FieldDescriptor, FieldKind, FieldSchema, text_key};

/// Raw handle for an uploaded file. Never serialized into JSON values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHandle {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub size: u64,
}

impl FileHandle {
    pub fn new(file_name: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            size,
        }
    }
}

/// Value held for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    /// Checkbox group: subfield name to checked state.
    Flags(BTreeMap<String, bool>),
    /// Parallel free text keyed by subfield name.
    Texts(BTreeMap<String, String>),
    File(FileHandle),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Whether the value counts as provided for required-field checks.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Flag(flag) => *flag,
            FieldValue::Flags(flags) => flags.values().any(|checked| *checked),
            FieldValue::Texts(texts) => texts.values().any(|text| !text.is_empty()),
            FieldValue::File(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_flags(&self) -> Option<&BTreeMap<String, bool>> {
        match self {
            FieldValue::Flags(flags) => Some(flags),
            _ => None,
        }
    }

    pub fn as_texts(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            FieldValue::Texts(texts) => Some(texts),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            FieldValue::File(handle) => Some(handle),
            _ => None,
        }
    }

    /// JSON form of the value; `None` for file handles.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            FieldValue::Text(text) => Some(Value::String(text.clone())),
            FieldValue::Flag(flag) => Some(Value::Bool(*flag)),
            FieldValue::Flags(flags) => Some(Value::Object(
                flags
                    .iter()
                    .map(|(key, checked)| (key.clone(), Value::Bool(*checked)))
                    .collect(),
            )),
            FieldValue::Texts(texts) => Some(Value::Object(
                texts
                    .iter()
                    .map(|(key, text)| (key.clone(), Value::String(text.clone())))
                    .collect(),
            )),
            FieldValue::File(_) => None,
        }
    }

    /// Reads a JSON value back into a field value. Numbers become text;
    /// null, arrays, and mixed objects have no representation.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(FieldValue::Text(text.clone())),
            Value::Bool(flag) => Some(FieldValue::Flag(*flag)),
            Value::Number(number) => Some(FieldValue::Text(number.to_string())),
            Value::Object(map) => object_value(map),
            Value::Null | Value::Array(_) => None,
        }
    }
}

fn object_value(map: &Map<String, Value>) -> Option<FieldValue> {
    if map.values().all(Value::is_boolean) {
        let flags = map
            .iter()
            .filter_map(|(key, value)| value.as_bool().map(|flag| (key.clone(), flag)))
            .collect();
        return Some(FieldValue::Flags(flags));
    }
    if map.values().all(Value::is_string) {
        let texts = map
            .iter()
            .filter_map(|(key, value)| value.as_str().map(|text| (key.clone(), text.to_string())))
            .collect();
        return Some(FieldValue::Texts(texts));
    }
    None
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<FileHandle> for FieldValue {
    fn from(value: FileHandle) -> Self {
        FieldValue::File(value)
    }
}

/// Per-session mapping from field name to value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct FormValues {
    entries: BTreeMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.entries.iter()
    }

    /// In-place update used while building values.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.entries.remove(name)
    }

    /// Text value for `name`, if it holds one.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn is_filled(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldValue::is_filled)
    }

    pub fn files(&self) -> impl Iterator<Item = (&String, &FileHandle)> {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.as_file().map(|handle| (name, handle)))
    }

    pub fn has_files(&self) -> bool {
        self.files().next().is_some()
    }

    /// Copy without file handles.
    pub fn without_files(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(_, value)| value.as_file().is_none())
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let serializable: Vec<(&String, Value)> = self
            .entries
            .iter()
            .filter_map(|(name, value)| value.to_json().map(|json| (name, json)))
            .collect();
        let mut map = serializer.serialize_map(Some(serializable.len()))?;
        for (name, json) in serializable {
            map.serialize_entry(name, &json)?;
        }
        map.end()
    }
}

impl From<BTreeMap<String, Value>> for FormValues {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut values = FormValues::new();
        for (name, value) in raw {
            match decode_entry(&name, &value) {
                Some(field_value) => values.set(name, field_value),
                None if value.is_null() => {}
                None => tracing::warn!(field = %name, "dropping value with unsupported shape"),
            }
        }
        values
    }
}

/// Values as a JSON object. File handles are omitted.
pub fn values_to_json(values: &FormValues) -> Value {
    Value::Object(
        values
            .iter()
            .filter_map(|(name, value)| value.to_json().map(|json| (name.clone(), json)))
            .collect(),
    )
}

/// An empty object has no shape of its own; under a `...Text` key it is the
/// free-text map of a checkbox group.
fn decode_entry(name: &str, value: &Value) -> Option<FieldValue> {
    match value {
        Value::Object(map) if map.is_empty() && name.ends_with("Text") => {
            Some(FieldValue::Texts(BTreeMap::new()))
        }
        _ => FieldValue::from_json(value),
    }
}

pub fn values_from_json(value: Value) -> Result<FormValues, FormsError> {
    match value {
        Value::Object(map) => Ok(FormValues::from(map.into_iter().collect::<BTreeMap<_, _>>())),
        Value::Null => Ok(FormValues::new()),
        _ => Err(FormsError::InvalidValues(
            "form values must be a JSON object".into(),
        )),
    }
}

/// Like [`values_from_json`], but group entries take the shape their field
/// declares, so empty groups decode to the right variant.
pub fn values_from_json_for(
    schema: &FieldSchema,
    value: Value,
) -> Result<FormValues, FormsError> {
    let mut values = values_from_json(value)?;
    for field in &schema.fields {
        if field.kind != FieldKind::CheckboxGroup {
            continue;
        }
        let empty_texts = matches!(
            values.get(&field.name),
            Some(FieldValue::Texts(texts)) if texts.is_empty()
        );
        if empty_texts {
            values.set(field.name.clone(), FieldValue::Flags(BTreeMap::new()));
        }
        let key = field.text_key();
        let empty_flags = matches!(
            values.get(&key),
            Some(FieldValue::Flags(flags)) if flags.is_empty()
        );
        if field.has_group_text() && empty_flags {
            values.set(key, FieldValue::Texts(BTreeMap::new()));
        }
    }
    Ok(values)
}

/// Inputs to [`initialize_with`] that are not part of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Field that defaults to the current year when it has no `defaultValue`.
    pub year_field: String,
    pub current_year: i32,
}

impl Defaults {
    pub fn current() -> Self {
        Self {
            year_field: "year".into(),
            current_year: OffsetDateTime::now_utc().year(),
        }
    }

    pub fn with_year_field(mut self, field: impl Into<String>) -> Self {
        self.year_field = field.into();
        self
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::current()
    }
}

/// Default values for every field in `schema`.
pub fn initialize(schema: &FieldSchema) -> FormValues {
    initialize_with(schema, &Defaults::current())
}

pub fn initialize_with(schema: &FieldSchema, defaults: &Defaults) -> FormValues {
    let mut values = FormValues::new();
    for field in &schema.fields {
        // A hidden field never replaces a value seeded by an earlier field.
        if field.kind == FieldKind::Hidden && values.contains(&field.name) {
            continue;
        }
        if let Some(value) = initial_value(field, defaults) {
            values.set(field.name.clone(), value);
        }
        if field.has_group_text() {
            let texts = field
                .subfields
                .iter()
                .map(|sub| (sub.name.clone(), String::new()))
                .collect();
            values.set(field.text_key(), FieldValue::Texts(texts));
        }
    }
    values
}

fn initial_value(field: &FieldDescriptor, defaults: &Defaults) -> Option<FieldValue> {
    let provided = field.default_value.as_ref().and_then(FieldValue::from_json);
    match &field.kind {
        FieldKind::File | FieldKind::Unsupported(_) => None,
        FieldKind::Checkbox => Some(provided.unwrap_or(FieldValue::Flag(false))),
        FieldKind::CheckboxGroup => {
            let mut flags: BTreeMap<String, bool> = field
                .subfields
                .iter()
                .map(|sub| (sub.name.clone(), false))
                .collect();
            if let Some(FieldValue::Flags(overrides)) = provided {
                flags.extend(overrides);
            }
            Some(FieldValue::Flags(flags))
        }
        _ => Some(provided.unwrap_or_else(|| {
            if field.name == defaults.year_field {
                FieldValue::Text(defaults.current_year.to_string())
            } else {
                FieldValue::Text(String::new())
            }
        })),
    }
}

/// Returns `values` with `name` replaced; every other entry is untouched.
pub fn set_value(values: &FormValues, name: &str, value: impl Into<FieldValue>) -> FormValues {
    let mut next = values.clone();
    next.set(name, value);
    next
}

/// Checks or unchecks one checkbox-group subfield. Typed text is kept.
pub fn set_group_flag(values: &FormValues, group: &str, sub: &str, checked: bool) -> FormValues {
    let mut flags = values.get(group).and_then(FieldValue::as_flags).cloned().unwrap_or_default();
    flags.insert(sub.to_string(), checked);
    set_value(values, group, FieldValue::Flags(flags))
}

/// Sets the free text attached to a checkbox-group subfield.
pub fn set_group_text(values: &FormValues, group: &str, sub: &str, text: &str) -> FormValues {
    let key = text_key(group);
    let mut texts = values.get(&key).and_then(FieldValue::as_texts).cloned().unwrap_or_default();
    texts.insert(sub.to_string(), text.to_string());
    set_value(values, &key, FieldValue::Texts(texts))
}
