use async_trait::async_trait;
use picton_forms::{
    BuiltinTemplates, Defaults, FieldSchema, FormSession, FormTemplate, FormsError, Step,
    TemplateSource,
};
use serde_json::json;

fn defaults() -> Defaults {
    Defaults {
        year_field: "year".into(),
        current_year: 2025,
    }
}

struct SingleTemplate(FormTemplate);

#[async_trait]
impl TemplateSource for SingleTemplate {
    async fn fetch_template(&self, id: u64) -> Result<FormTemplate, FormsError> {
        if id == self.0.id {
            Ok(self.0.clone())
        } else {
            Err(FormsError::TemplateNotFound(id.to_string()))
        }
    }

    async fn list_templates(&self) -> Result<Vec<FormTemplate>, FormsError> {
        Ok(vec![self.0.clone()])
    }
}

fn contact_template() -> FormTemplate {
    let schema: FieldSchema = serde_json::from_value(json!({
        "fields": [
            { "name": "email", "type": "email", "required": true },
            { "name": "year", "type": "text" }
        ]
    }))
    .expect("deserialize");
    FormTemplate::new(7, "Contact Update", schema)
}

#[tokio::test]
async fn load_then_walk_the_steps() {
    let source = SingleTemplate(contact_template());
    let mut session = FormSession::with_defaults(defaults());

    let applied = session.load(&source, 7).await.expect("load");
    assert!(applied);
    assert_eq!(session.values().text("year"), Some("2025"));

    assert_eq!(session.next_step().expect("select"), Step::FillFields);
    let err = session.next_step().expect_err("email missing");
    assert_eq!(err.to_string(), "Please fill in all required fields");
    assert_eq!(session.step(), Step::FillFields);

    session.set_value("email", "a@b.com");
    assert_eq!(session.next_step().expect("fill"), Step::Preview);

    let payload = session.submit_checked().expect("payload");
    assert_eq!(payload.form_template, 7);
    assert_eq!(payload.form_data.text("email"), Some("a@b.com"));
}

#[tokio::test]
async fn unknown_template_is_an_error() {
    let source = SingleTemplate(contact_template());
    let mut session = FormSession::with_defaults(defaults());
    let err = session.load(&source, 99).await.expect_err("missing");
    assert!(matches!(err, FormsError::TemplateNotFound(_)));
    assert!(session.template().is_none());
}

#[tokio::test]
async fn closed_session_refuses_loads_and_submits() {
    let mut session = FormSession::with_defaults(defaults());
    session.load(&BuiltinTemplates, 2).await.expect("load");
    session.close();
    assert!(matches!(
        session.load(&BuiltinTemplates, 1).await,
        Err(FormsError::SessionClosed)
    ));
    assert!(matches!(session.submit_checked(), Err(FormsError::SessionClosed)));

    session.reopen();
    assert!(session.load(&BuiltinTemplates, 1).await.expect("reload"));
    assert_eq!(session.template().map(|template| template.id), Some(1));
}

#[tokio::test]
async fn builtin_source_lists_active_templates() {
    let templates = BuiltinTemplates.list_templates().await.expect("list");
    let names: Vec<_> = templates.iter().map(|template| template.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Graduate Petition Form",
            "Term Withdrawal Form",
            "Graduate Posthumous Degree Petition"
        ]
    );
}
