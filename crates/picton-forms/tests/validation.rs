use picton_forms::{
    FieldSchema, FormValues, ValidationReport, build_render_payload, initialize, set_value,
    validate, validate::REQUIRED_FIELDS_NOTICE,
};
use proptest::prelude::*;
use serde_json::json;

fn required_text_schema(count: usize) -> FieldSchema {
    let fields = (0..count)
        .map(|idx| json!({ "name": format!("field_{idx}"), "type": "text", "required": true }))
        .collect::<Vec<_>>();
    serde_json::from_value(json!({ "fields": fields })).expect("deserialize")
}

proptest! {
    #[test]
    fn fails_until_every_required_field_is_populated(
        count in 1..12usize,
        filled in proptest::collection::vec(any::<bool>(), 12)
    ) {
        let schema = required_text_schema(count);
        let mut values = initialize(&schema);
        let mut populated = 0;
        for (idx, fill) in filled.iter().take(count).enumerate() {
            if *fill {
                values = set_value(&values, &format!("field_{idx}"), "x");
                populated += 1;
            }
        }
        let report = validate(&schema, &values);
        prop_assert_eq!(report.valid, populated == count);
        prop_assert_eq!(report.missing_required.len(), count - populated);
    }

    #[test]
    fn initialize_is_idempotent(count in 0..8usize) {
        let schema = required_text_schema(count);
        prop_assert_eq!(initialize(&schema), initialize(&schema));
    }
}

#[test]
fn email_scenario() {
    let schema: FieldSchema = serde_json::from_value(json!({
        "fields": [{ "name": "email", "type": "email", "required": true }]
    }))
    .expect("deserialize");

    let report = validate(&schema, &FormValues::new());
    assert!(!report.valid);
    assert_eq!(report.notice(), Some(REQUIRED_FIELDS_NOTICE));

    let values = set_value(&FormValues::new(), "email", "a@b.com");
    assert!(validate(&schema, &values).valid);
}

#[test]
fn zero_field_schema_renders_nothing_and_validates() {
    let schema = FieldSchema::default();
    let values = initialize(&schema);
    assert!(values.is_empty());
    let payload = build_render_payload(&schema, &values);
    assert!(payload.fields.is_empty());
    assert_eq!(validate(&schema, &values), ValidationReport {
        valid: true,
        ..ValidationReport::default()
    });
}

#[test]
fn required_checkbox_must_be_checked() {
    let schema: FieldSchema = serde_json::from_value(json!({
        "fields": [
            { "name": "agree", "type": "checkbox", "required": true },
            { "name": "initials", "type": "checkboxGroup", "required": true,
              "subfields": [{ "name": "a" }, { "name": "b" }] }
        ]
    }))
    .expect("deserialize");
    let values = initialize(&schema);
    let report = validate(&schema, &values);
    assert_eq!(report.missing_required, vec!["agree".to_string(), "initials".to_string()]);

    let values = set_value(&values, "agree", true);
    let values = picton_forms::set_group_flag(&values, "initials", "b", true);
    assert!(validate(&schema, &values).valid);
}

#[test]
fn graduate_petition_other_needs_explanation() {
    let template = picton_forms::find_builtin("Graduate Petition Form").expect("template");
    let mut values = initialize(&template.field_schema);
    for (name, value) in [
        ("first_name", "Ada"),
        ("last_name", "Lovelace"),
        ("student_id", "1234567"),
        ("phone_number", "7135550100"),
        ("email_address", "ada@uh.edu"),
        ("program_plan", "Mathematics MS"),
        ("academic_career", "graduate"),
        ("season", "Fall"),
        ("petition_purpose", "other"),
    ] {
        values = set_value(&values, name, value);
    }
    let report = validate(&template.field_schema, &values);
    assert!(!report.valid);
    assert_eq!(
        report.notice(),
        Some("Please provide an explanation for your petition")
    );

    let values = set_value(&values, "petition_explanation", "Late add of a course");
    assert!(validate(&template.field_schema, &values).valid);
}
