use serde_json::{Map, Value, json};

use crate::{
    spec::{FieldDescriptor, FieldKind, FieldSchema},
    validate::validate,
    values::{FieldValue, FormValues},
    values_schema,
};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Required input is still missing.
    NeedInput,
    /// The values pass validation.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Input kind of a single-line control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Number,
    Date,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Number => "number",
            InputKind::Date => "date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceStyle {
    Radio,
    Select,
}

impl ChoiceStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceStyle::Radio => "radio",
            ChoiceStyle::Select => "select",
        }
    }
}

/// Normalized option: the value is stored, the label is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOption {
    pub value: String,
    pub label: String,
}

/// One checkbox inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItem {
    pub name: String,
    pub label: String,
    pub checked: bool,
    /// Free-text slot; only present for checked items of the `initials` group.
    pub text: Option<String>,
}

/// Control chosen for a field by type dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Input { input: InputKind, value: String },
    TextArea { value: String },
    Toggle { checked: bool },
    Choice {
        style: ChoiceStyle,
        options: Vec<RenderOption>,
        selected: Option<String>,
    },
    CheckboxGroup {
        text_key: Option<String>,
        items: Vec<GroupItem>,
    },
    FileInput { file_name: Option<String> },
    Unsupported { kind: String },
}

impl Control {
    pub fn kind_label(&self) -> &'static str {
        match self {
            Control::Input { .. } => "input",
            Control::TextArea { .. } => "textarea",
            Control::Toggle { .. } => "toggle",
            Control::Choice { .. } => "choice",
            Control::CheckboxGroup { .. } => "checkbox_group",
            Control::FileInput { .. } => "file",
            Control::Unsupported { .. } => "unsupported",
        }
    }
}

/// Describes a single rendered field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderField {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub full_width: bool,
    pub filled: bool,
    pub control: Control,
}

/// Progress counters exposed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderProgress {
    pub filled: usize,
    pub total: usize,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub status: RenderStatus,
    pub progress: RenderProgress,
    pub fields: Vec<RenderField>,
    pub missing_required: Vec<String>,
    pub notice: Option<String>,
    pub schema: Value,
}

/// Build the renderer payload from the schema and current values.
/// Hidden fields are not rendered.
pub fn build_render_payload(schema: &FieldSchema, values: &FormValues) -> RenderPayload {
    let fields = schema
        .fields
        .iter()
        .filter_map(|field| render_field(field, values))
        .collect::<Vec<_>>();

    let report = validate(schema, values);
    let filled = fields.iter().filter(|field| field.filled).count();
    let status = if report.valid {
        RenderStatus::Complete
    } else {
        RenderStatus::NeedInput
    };

    RenderPayload {
        status,
        progress: RenderProgress {
            filled,
            total: fields.len(),
        },
        fields,
        notice: report.notice().map(str::to_string),
        missing_required: report.missing_required,
        schema: values_schema::generate(schema),
    }
}

/// `None` for hidden fields, which carry data but have no control.
fn render_field(field: &FieldDescriptor, values: &FormValues) -> Option<RenderField> {
    let value = values.get(&field.name);
    let control = control_for(field, value, values)?;
    Some(RenderField {
        name: field.name.clone(),
        label: field.display_label().to_string(),
        required: field.required,
        placeholder: field.placeholder.clone(),
        full_width: field.full_width,
        filled: value.is_some_and(FieldValue::is_filled),
        control,
    })
}

fn control_for(
    field: &FieldDescriptor,
    value: Option<&FieldValue>,
    values: &FormValues,
) -> Option<Control> {
    let text = || value.and_then(FieldValue::as_text).unwrap_or_default().to_string();
    let input = |input: InputKind| Control::Input {
        input,
        value: text(),
    };
    let control = match &field.kind {
        FieldKind::Hidden => return None,
        FieldKind::Text => input(InputKind::Text),
        FieldKind::Email => input(InputKind::Email),
        FieldKind::Number => input(InputKind::Number),
        FieldKind::Date => input(InputKind::Date),
        FieldKind::Textarea => Control::TextArea { value: text() },
        FieldKind::Checkbox => Control::Toggle {
            checked: value.and_then(FieldValue::as_flag).unwrap_or(false),
        },
        FieldKind::Radio | FieldKind::Select => Control::Choice {
            style: if field.kind == FieldKind::Radio {
                ChoiceStyle::Radio
            } else {
                ChoiceStyle::Select
            },
            options: field
                .options
                .iter()
                .map(|option| RenderOption {
                    value: option.value().to_string(),
                    label: option.label().to_string(),
                })
                .collect(),
            selected: value
                .and_then(FieldValue::as_text)
                .filter(|selected| !selected.is_empty())
                .map(str::to_string),
        },
        FieldKind::CheckboxGroup => group_control(field, value, values),
        FieldKind::File => Control::FileInput {
            file_name: value
                .and_then(FieldValue::as_file)
                .map(|handle| handle.file_name.clone()),
        },
        FieldKind::Unsupported(kind) => Control::Unsupported { kind: kind.clone() },
    };
    Some(control)
}

fn group_control(
    field: &FieldDescriptor,
    value: Option<&FieldValue>,
    values: &FormValues,
) -> Control {
    let flags = value.and_then(FieldValue::as_flags);
    let text_key = field.has_group_text().then(|| field.text_key());
    let texts = text_key
        .as_deref()
        .and_then(|key| values.get(key))
        .and_then(FieldValue::as_texts);

    let items = field
        .subfields
        .iter()
        .map(|sub| {
            let checked = flags
                .and_then(|flags| flags.get(&sub.name))
                .copied()
                .unwrap_or(false);
            let text = (text_key.is_some() && checked).then(|| {
                texts
                    .and_then(|texts| texts.get(&sub.name))
                    .cloned()
                    .unwrap_or_default()
            });
            GroupItem {
                name: sub.name.clone(),
                label: sub.display_label().to_string(),
                checked,
                text,
            }
        })
        .collect();

    Control::CheckboxGroup { text_key, items }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("name".into(), Value::String(field.name.clone()));
            map.insert("label".into(), Value::String(field.label.clone()));
            map.insert("required".into(), Value::Bool(field.required));
            map.insert("filled".into(), Value::Bool(field.filled));
            if let Some(placeholder) = &field.placeholder {
                map.insert("placeholder".into(), Value::String(placeholder.clone()));
            }
            if field.full_width {
                map.insert("full_width".into(), Value::Bool(true));
            }
            map.insert("control".into(), control_json(&field.control));
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "status": payload.status.as_str(),
        "progress": {
            "filled": payload.progress.filled,
            "total": payload.progress.total,
        },
        "missing_required": payload.missing_required,
        "notice": payload.notice,
        "fields": fields,
        "schema": payload.schema,
    })
}

fn control_json(control: &Control) -> Value {
    let mut map = Map::new();
    map.insert("kind".into(), Value::String(control.kind_label().into()));
    match control {
        Control::Input { input, value } => {
            map.insert("input".into(), Value::String(input.as_str().into()));
            map.insert("value".into(), Value::String(value.clone()));
        }
        Control::TextArea { value } => {
            map.insert("value".into(), Value::String(value.clone()));
        }
        Control::Toggle { checked } => {
            map.insert("checked".into(), Value::Bool(*checked));
        }
        Control::Choice {
            style,
            options,
            selected,
        } => {
            map.insert("style".into(), Value::String(style.as_str().into()));
            map.insert(
                "options".into(),
                Value::Array(
                    options
                        .iter()
                        .map(|option| json!({ "value": option.value, "label": option.label }))
                        .collect(),
                ),
            );
            map.insert(
                "selected".into(),
                selected.clone().map(Value::String).unwrap_or(Value::Null),
            );
        }
        Control::CheckboxGroup { text_key, items } => {
            if let Some(key) = text_key {
                map.insert("text_key".into(), Value::String(key.clone()));
            }
            map.insert(
                "items".into(),
                Value::Array(
                    items
                        .iter()
                        .map(|item| {
                            let mut entry = Map::new();
                            entry.insert("name".into(), Value::String(item.name.clone()));
                            entry.insert("label".into(), Value::String(item.label.clone()));
                            entry.insert("checked".into(), Value::Bool(item.checked));
                            if let Some(text) = &item.text {
                                entry.insert("text".into(), Value::String(text.clone()));
                            }
                            Value::Object(entry)
                        })
                        .collect(),
                ),
            );
        }
        Control::FileInput { file_name } => {
            map.insert(
                "file_name".into(),
                file_name.clone().map(Value::String).unwrap_or(Value::Null),
            );
        }
        Control::Unsupported { kind } => {
            map.insert("type".into(), Value::String(kind.clone()));
            map.insert(
                "message".into(),
                Value::String(format!("unsupported field type: {kind}")),
            );
        }
    }
    Value::Object(map)
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.filled,
        payload.progress.total
    ));
    if let Some(notice) = &payload.notice {
        lines.push(format!("Notice: {}", notice));
    }
    if payload.fields.is_empty() {
        lines.push("No fields.".to_string());
    }

    for field in &payload.fields {
        let mut entry = format!(" - {} ({})", field.name, field.label);
        if field.required {
            entry.push_str(" [required]");
        }
        match &field.control {
            Control::Input { input, value } => {
                entry.push_str(&format!(" <{}>", input.as_str()));
                if !value.is_empty() {
                    entry.push_str(&format!(" = {}", value));
                }
            }
            Control::TextArea { value } => {
                entry.push_str(" <textarea>");
                if !value.is_empty() {
                    entry.push_str(&format!(" = {}", value.replace('\n', " ")));
                }
            }
            Control::Toggle { checked } => {
                entry.push_str(&format!(" [{}]", if *checked { "x" } else { " " }));
            }
            Control::Choice {
                style, selected, ..
            } => {
                entry.push_str(&format!(" <{}>", style.as_str()));
                if let Some(selected) = selected {
                    entry.push_str(&format!(" = {}", selected));
                }
            }
            Control::FileInput { file_name } => {
                entry.push_str(" <file>");
                if let Some(file_name) = file_name {
                    entry.push_str(&format!(" = {}", file_name));
                }
            }
            Control::Unsupported { kind } => {
                entry.push_str(&format!(" (unsupported field type: {})", kind));
            }
            Control::CheckboxGroup { .. } => {}
        }
        lines.push(entry);

        if let Control::Choice { options, .. } = &field.control {
            for option in options {
                lines.push(format!("     * {} ({})", option.label, option.value));
            }
        }
        if let Control::CheckboxGroup { items, .. } = &field.control {
            for item in items {
                let mut line = format!(
                    "     [{}] {}",
                    if item.checked { "x" } else { " " },
                    item.label
                );
                if let Some(text) = &item.text {
                    line.push_str(&format!(" initials: {}", text));
                }
                lines.push(line);
            }
        }
    }

    lines.join("\n")
}
