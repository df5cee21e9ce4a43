use async_trait::async_trait;

use crate::catalog::{FormTemplate, builtin_templates};
use crate::error::FormsError;
use crate::payload::SubmissionPayload;
use crate::spec::FieldSchema;
use crate::validate::{ValidationReport, validate};
use crate::values::{
    Defaults, FieldValue, FormValues, initialize_with, set_group_flag, set_group_text, set_value,
};

static EMPTY_SCHEMA: FieldSchema = FieldSchema { fields: Vec::new() };

/// Where form templates come from, usually the `/forms/templates` API.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch_template(&self, id: u64) -> Result<FormTemplate, FormsError>;
    async fn list_templates(&self) -> Result<Vec<FormTemplate>, FormsError>;
}

/// Serves the templates embedded in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

#[async_trait]
impl TemplateSource for BuiltinTemplates {
    async fn fetch_template(&self, id: u64) -> Result<FormTemplate, FormsError> {
        builtin_templates()
            .iter()
            .find(|template| template.id == id)
            .cloned()
            .ok_or_else(|| FormsError::TemplateNotFound(id.to_string()))
    }

    async fn list_templates(&self) -> Result<Vec<FormTemplate>, FormsError> {
        Ok(builtin_templates()
            .iter()
            .filter(|template| template.is_active)
            .cloned()
            .collect())
    }
}

/// Identifies one in-flight template load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Steps of the submission dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SelectForm,
    FillFields,
    Preview,
}

/// Owns the values of one open submission dialog.
#[derive(Debug, Clone)]
pub struct FormSession {
    generation: u64,
    open: bool,
    step: Step,
    template: Option<FormTemplate>,
    values: FormValues,
    defaults: Defaults,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self::with_defaults(Defaults::current())
    }

    pub fn with_defaults(defaults: Defaults) -> Self {
        Self {
            generation: 0,
            open: true,
            step: Step::SelectForm,
            template: None,
            values: FormValues::new(),
            defaults,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn template(&self) -> Option<&FormTemplate> {
        self.template.as_ref()
    }

    pub fn schema(&self) -> &FieldSchema {
        self.template
            .as_ref()
            .map(|template| &template.field_schema)
            .unwrap_or(&EMPTY_SCHEMA)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Starts a load; any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Installs a fetched template and resets the values to its defaults.
    /// Returns `false` when the ticket is stale or the session was closed.
    pub fn apply_loaded(&mut self, ticket: LoadTicket, template: FormTemplate) -> bool {
        if !self.open {
            tracing::debug!(template = template.id, "ignoring template load for closed session");
            return false;
        }
        if ticket.generation != self.generation {
            tracing::debug!(
                template = template.id,
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale template load"
            );
            return false;
        }
        self.values = initialize_with(&template.field_schema, &self.defaults);
        self.template = Some(template);
        true
    }

    pub async fn load<S>(&mut self, source: &S, id: u64) -> Result<bool, FormsError>
    where
        S: TemplateSource + ?Sized,
    {
        if !self.open {
            return Err(FormsError::SessionClosed);
        }
        let ticket = self.begin_load();
        let template = source.fetch_template(id).await?;
        Ok(self.apply_loaded(ticket, template))
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values = set_value(&self.values, name, value);
    }

    pub fn set_group_flag(&mut self, group: &str, sub: &str, checked: bool) {
        self.values = set_group_flag(&self.values, group, sub, checked);
    }

    pub fn set_group_text(&mut self, group: &str, sub: &str, text: &str) {
        self.values = set_group_text(&self.values, group, sub, text);
    }

    pub fn validate(&self) -> ValidationReport {
        validate(self.schema(), &self.values)
    }

    /// Advances the dialog. Leaving the field step requires valid values.
    pub fn next_step(&mut self) -> Result<Step, FormsError> {
        self.step = match self.step {
            Step::SelectForm => {
                if self.template.is_none() {
                    return Err(FormsError::NoTemplateSelected);
                }
                Step::FillFields
            }
            Step::FillFields => {
                let report = self.validate();
                if !report.valid {
                    return Err(FormsError::Invalid(report));
                }
                Step::Preview
            }
            Step::Preview => Step::Preview,
        };
        Ok(self.step)
    }

    pub fn prev_step(&mut self) -> Step {
        self.step = match self.step {
            Step::SelectForm | Step::FillFields => Step::SelectForm,
            Step::Preview => Step::FillFields,
        };
        self.step
    }

    /// The payload to post, or an error if the values do not validate.
    pub fn submit_checked(&self) -> Result<SubmissionPayload, FormsError> {
        if !self.open {
            return Err(FormsError::SessionClosed);
        }
        let template = self.template.as_ref().ok_or(FormsError::NoTemplateSelected)?;
        let report = self.validate();
        if !report.valid {
            return Err(FormsError::Invalid(report));
        }
        Ok(SubmissionPayload::new(template.id, self.values.clone()))
    }

    /// Discards the values; loads still in flight are ignored once they land.
    pub fn close(&mut self) {
        self.open = false;
        self.generation += 1;
        self.step = Step::SelectForm;
        self.template = None;
        self.values = FormValues::new();
    }

    pub fn reopen(&mut self) {
        self.open = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Defaults {
        Defaults {
            year_field: "year".into(),
            current_year: 2024,
        }
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut session = FormSession::with_defaults(defaults());
        let first = session.begin_load();
        let second = session.begin_load();
        let petition = builtin_templates()[0].clone();
        let withdrawal = builtin_templates()[1].clone();

        assert!(session.apply_loaded(second, withdrawal));
        assert!(!session.apply_loaded(first, petition));
        assert_eq!(session.template().map(|t| t.id), Some(2));
    }

    #[test]
    fn closed_session_ignores_late_load() {
        let mut session = FormSession::with_defaults(defaults());
        let ticket = session.begin_load();
        session.close();
        assert!(!session.apply_loaded(ticket, builtin_templates()[0].clone()));
        assert!(session.values().is_empty());
        assert!(session.template().is_none());
    }

    #[test]
    fn select_step_needs_a_template() {
        let mut session = FormSession::with_defaults(defaults());
        assert!(matches!(session.next_step(), Err(FormsError::NoTemplateSelected)));
        assert_eq!(session.step(), Step::SelectForm);
    }
}
