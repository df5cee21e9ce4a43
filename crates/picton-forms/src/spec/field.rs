use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of field kinds understood by the renderer.
///
/// Unknown `type` strings are kept as [`FieldKind::Unsupported`] so the schema
/// still loads and the field renders as an explicit placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Email,
    Number,
    Date,
    Checkbox,
    CheckboxGroup,
    Radio,
    Select,
    File,
    Hidden,
    Unsupported(String),
}

impl FieldKind {
    /// Wire name used in the JSON schema.
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Email => "email",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Checkbox => "checkbox",
            FieldKind::CheckboxGroup => "checkboxGroup",
            FieldKind::Radio => "radio",
            FieldKind::Select => "select",
            FieldKind::File => "file",
            FieldKind::Hidden => "hidden",
            FieldKind::Unsupported(raw) => raw,
        }
    }

    /// Kinds whose value is a plain string.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            FieldKind::Text
                | FieldKind::Textarea
                | FieldKind::Email
                | FieldKind::Number
                | FieldKind::Date
                | FieldKind::Radio
                | FieldKind::Select
                | FieldKind::Hidden
        )
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, FieldKind::Radio | FieldKind::Select)
    }
}

impl From<String> for FieldKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "text" => FieldKind::Text,
            "textarea" => FieldKind::Textarea,
            "email" => FieldKind::Email,
            "number" => FieldKind::Number,
            "date" => FieldKind::Date,
            "checkbox" => FieldKind::Checkbox,
            "checkboxGroup" => FieldKind::CheckboxGroup,
            "radio" => FieldKind::Radio,
            "select" => FieldKind::Select,
            "file" => FieldKind::File,
            "hidden" => FieldKind::Hidden,
            _ => FieldKind::Unsupported(raw),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A radio/select option: either a bare string or a `{value, label}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldOption {
    Plain(String),
    Labeled {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl FieldOption {
    /// Value stored in the form values.
    pub fn value(&self) -> &str {
        match self {
            FieldOption::Plain(value) => value,
            FieldOption::Labeled { value, .. } => value,
        }
    }

    /// Text shown to the user.
    pub fn label(&self) -> &str {
        match self {
            FieldOption::Plain(value) => value,
            FieldOption::Labeled { value, label } => label.as_deref().unwrap_or(value),
        }
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    #[schemars(with = "String")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subfields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub full_width: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|option| FieldOption::Plain(option.into()))
            .collect();
        self
    }

    pub fn with_subfields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subfields = names
            .into_iter()
            .map(|name| FieldDescriptor::new(name, FieldKind::Checkbox))
            .collect();
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Label shown to the user, falling back to the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Key under which a checkbox group keeps its parallel free-text values.
    pub fn text_key(&self) -> String {
        text_key(&self.name)
    }

    /// Only the `initials` group carries a free-text value per checked subfield.
    pub fn has_group_text(&self) -> bool {
        self.kind == FieldKind::CheckboxGroup && self.name == INITIALS_FIELD
    }
}

/// Name of the checkbox group that exposes per-item free text.
pub const INITIALS_FIELD: &str = "initials";

pub fn text_key(group: &str) -> String {
    format!("{group}Text")
}
