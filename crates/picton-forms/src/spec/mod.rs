pub mod field;
pub mod schema;

pub use field::{FieldDescriptor, FieldKind, FieldOption, INITIALS_FIELD, text_key};
pub use schema::{FieldSchema, parse_schema, parse_schema_or_empty};
