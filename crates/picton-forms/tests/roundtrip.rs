use picton_forms::{
    Control, FieldSchema, FieldValue, FileHandle, FormValues, build_render_payload, find_builtin,
    initialize, set_group_flag, set_group_text, set_value, values_from_json, values_from_json_for,
    values_to_json,
};
use serde_json::json;

#[test]
fn json_roundtrip_drops_only_file_handles() {
    let template = find_builtin("withdrawal").expect("template");
    let values = initialize(&template.field_schema);
    let values = set_value(&values, "first_name", "Ada");
    let values = set_group_flag(&values, "initials", "veterans", true);
    let values = set_group_text(&values, "initials", "veterans", "AL");
    let values = set_value(&values, "supporting_document", FileHandle::new("dd214.pdf", 512));

    let json = values_to_json(&values);
    assert!(json.get("supporting_document").is_none());

    let decoded = values_from_json(json).expect("decode");
    assert_eq!(decoded, values.without_files());
}

#[test]
fn initials_text_input_follows_checked_state() {
    let schema: FieldSchema = serde_json::from_value(json!({
        "fields": [{
            "name": "initials",
            "type": "checkboxGroup",
            "subfields": [{ "name": "s1", "label": "Student Housing" }]
        }]
    }))
    .expect("deserialize");

    let values = initialize(&schema);
    let item = |values: &FormValues| {
        match &build_render_payload(&schema, values).fields[0].control {
            Control::CheckboxGroup { items, .. } => items[0].clone(),
            other => panic!("unexpected control {other:?}"),
        }
    };

    assert!(item(&values).text.is_none());

    let values = set_group_flag(&values, "initials", "s1", true);
    assert_eq!(item(&values).text.as_deref(), Some(""));

    let values = set_group_text(&values, "initials", "s1", "JD");
    assert_eq!(item(&values).text.as_deref(), Some("JD"));

    let values = set_group_flag(&values, "initials", "s1", false);
    assert!(item(&values).text.is_none());
    let texts = values
        .get("initialsText")
        .and_then(FieldValue::as_texts)
        .expect("texts");
    assert_eq!(texts.get("s1").map(String::as_str), Some("JD"));
}

#[test]
fn withdrawal_defaults_keep_seeded_initials_text() {
    let template = find_builtin("Term Withdrawal Form").expect("template");
    let values = initialize(&template.field_schema);
    let texts = values
        .get("initialsText")
        .and_then(FieldValue::as_texts)
        .expect("initials text mapping");
    assert_eq!(texts.len(), 9);
    assert!(!values.contains("supporting_document"));
}

#[test]
fn schema_pretty_json_roundtrips() {
    let template = find_builtin("1").expect("template");
    let pretty = template.field_schema.to_json_pretty().expect("serialize");
    let parsed = picton_forms::parse_schema(&pretty).expect("parse");
    assert_eq!(parsed, template.field_schema);
}

#[test]
fn empty_initials_text_survives_roundtrip() {
    let schema: FieldSchema = serde_json::from_value(json!({
        "fields": [{ "name": "initials", "type": "checkboxGroup", "subfields": [] }]
    }))
    .expect("deserialize");
    let values = initialize(&schema);
    assert!(matches!(
        values.get("initialsText"),
        Some(FieldValue::Texts(texts)) if texts.is_empty()
    ));

    let decoded = values_from_json(values_to_json(&values)).expect("decode");
    assert_eq!(decoded, values);
    let decoded = values_from_json_for(&schema, values_to_json(&values)).expect("decode");
    assert_eq!(decoded, values);
}

#[test]
fn empty_groups_decode_by_declared_shape() {
    let schema: FieldSchema = serde_json::from_value(json!({
        "fields": [{ "name": "waiverText", "type": "checkboxGroup", "subfields": [] }]
    }))
    .expect("deserialize");
    let values = set_value(
        &FormValues::new(),
        "waiverText",
        FieldValue::Flags(Default::default()),
    );

    let decoded = values_from_json_for(&schema, values_to_json(&values)).expect("decode");
    assert_eq!(decoded, values);
}
