use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormsError;
use crate::spec::FieldSchema;

const GRADUATE_PETITION: &str = include_str!("../templates/graduate_petition.json");
const TERM_WITHDRAWAL: &str = include_str!("../templates/term_withdrawal.json");
const GRADUATE_POSTHUMOUS: &str = include_str!("../templates/graduate_posthumous.json");

/// A form template as served by `/forms/templates/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormTemplate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "schema_from_any")]
    #[schemars(with = "FieldSchema")]
    pub field_schema: FieldSchema,
    #[serde(default = "default_required_approvals")]
    pub required_approvals: u32,
    #[serde(default)]
    pub latex_template_path: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_required_approvals() -> u32 {
    1
}

fn default_active() -> bool {
    true
}

/// Accepts the schema as an object, a bare array, or an encoded JSON string.
fn schema_from_any<'de, D>(deserializer: D) -> Result<FieldSchema, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    FieldSchema::from_value(value).map_err(serde::de::Error::custom)
}

impl FormTemplate {
    pub fn new(id: u64, name: impl Into<String>, field_schema: FieldSchema) -> Self {
        let name = name.into();
        Self {
            id,
            latex_template_path: default_latex_path(&name),
            name,
            description: String::new(),
            field_schema,
            required_approvals: 1,
            is_active: true,
        }
    }

    /// Configured LaTeX path, or the one derived from the name.
    pub fn latex_path(&self) -> String {
        if self.latex_template_path.is_empty() {
            default_latex_path(&self.name)
        } else {
            self.latex_template_path.clone()
        }
    }

    pub fn form_type_code(&self) -> String {
        form_type_code(&self.name)
    }
}

/// `Term Withdrawal Form` -> `term_withdrawal_form.tex`.
pub fn default_latex_path(name: &str) -> String {
    format!("{}.tex", name.to_lowercase().replace(' ', "_"))
}

/// Short code for a template, used in generated file names.
pub fn form_type_code(name: &str) -> String {
    if name.contains("Graduate Petition") {
        return "petition".into();
    }
    if name.contains("Term Withdrawal") {
        return "withdrawal".into();
    }
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 1 {
        words
            .iter()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_lowercase)
            .collect()
    } else {
        name.to_lowercase().replace(' ', "_").chars().take(10).collect()
    }
}

static BUILTIN: Lazy<Vec<FormTemplate>> = Lazy::new(|| {
    [GRADUATE_PETITION, TERM_WITHDRAWAL, GRADUATE_POSTHUMOUS]
        .iter()
        .map(|raw| serde_json::from_str(raw).expect("embedded form template"))
        .collect()
});

/// Templates shipped with the crate, ordered by id.
pub fn builtin_templates() -> &'static [FormTemplate] {
    &BUILTIN
}

/// Looks up a template by exact name, then case-insensitive substring, then id.
pub fn find_template<'a>(
    templates: &'a [FormTemplate],
    key: &str,
) -> Result<&'a FormTemplate, FormsError> {
    if let Some(found) = templates.iter().find(|template| template.name == key) {
        return Ok(found);
    }
    let needle = key.to_lowercase();
    if !needle.is_empty()
        && let Some(found) = templates
            .iter()
            .find(|template| template.name.to_lowercase().contains(&needle))
    {
        return Ok(found);
    }
    if let Ok(id) = key.parse::<u64>()
        && let Some(found) = templates.iter().find(|template| template.id == id)
    {
        return Ok(found);
    }
    Err(FormsError::TemplateNotFound(key.to_string()))
}

pub fn find_builtin(key: &str) -> Result<&'static FormTemplate, FormsError> {
    find_template(builtin_templates(), key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::FieldKind;

    #[test]
    fn builtin_catalog_loads() {
        let templates = builtin_templates();
        let ids: Vec<_> = templates.iter().map(|template| template.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let withdrawal = &templates[1];
        let initials = withdrawal.field_schema.field("initials").unwrap();
        assert_eq!(initials.kind, FieldKind::CheckboxGroup);
        assert_eq!(initials.subfields.len(), 9);
        assert!(withdrawal.field_schema.duplicate_names().is_empty());
    }

    #[test]
    fn lookup_order() {
        assert_eq!(find_builtin("Term Withdrawal Form").unwrap().id, 2);
        assert_eq!(find_builtin("posthumous").unwrap().id, 3);
        assert_eq!(find_builtin("1").unwrap().id, 1);
        assert!(matches!(
            find_builtin("transcript"),
            Err(FormsError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn type_codes() {
        assert_eq!(form_type_code("Graduate Petition Form"), "petition");
        assert_eq!(form_type_code("Term Withdrawal Form"), "withdrawal");
        assert_eq!(form_type_code("Graduate Posthumous Degree Petition"), "gpdp");
        assert_eq!(form_type_code("Transcripts"), "transcript");
    }

    #[test]
    fn latex_path_falls_back_to_name() {
        let template = FormTemplate::new(9, "Change of Major", FieldSchema::default());
        assert_eq!(template.latex_path(), "change_of_major.tex");
    }

    #[test]
    fn schema_may_be_an_encoded_string() {
        let raw = r#"{"id":4,"name":"X","field_schema":"[{\"name\":\"a\"}]"}"#;
        let template: FormTemplate = serde_json::from_str(raw).unwrap();
        assert_eq!(template.field_schema.fields.len(), 1);
        assert_eq!(template.required_approvals, 1);
    }
}
