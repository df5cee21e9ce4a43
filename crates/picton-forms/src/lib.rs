#![allow(missing_docs)]

pub mod builder;
pub mod catalog;
pub mod error;
pub mod latex;
pub mod payload;
pub mod render;
pub mod session;
pub mod spec;
pub mod validate;
pub mod values;
pub mod values_schema;

pub use builder::{
    BUILDER_FIELD_TYPES, FieldPatch, add_field, parse_options_csv, remove_field, update_field,
};
pub use catalog::{
    FormTemplate, builtin_templates, default_latex_path, find_builtin, find_template,
    form_type_code,
};
pub use error::FormsError;
pub use latex::{Replacements, Signoff, fill_template, placeholders_in, unused_fields};
pub use payload::{Encoded, Part, PreviewResponse, SubmissionPayload, encode};
pub use render::{
    Control, RenderField, RenderPayload, RenderProgress, RenderStatus, build_render_payload,
    render_json_ui, render_text,
};
pub use session::{BuiltinTemplates, FormSession, LoadTicket, Step, TemplateSource};
pub use spec::{
    FieldDescriptor, FieldKind, FieldOption, FieldSchema, parse_schema, parse_schema_or_empty,
};
pub use validate::{ConditionalRequirement, ValidationError, ValidationReport, validate};
pub use values::{
    Defaults, FieldValue, FileHandle, FormValues, initialize, initialize_with, set_group_flag,
    set_group_text, set_value, values_from_json, values_from_json_for, values_to_json,
};
pub use values_schema::generate as values_schema;
