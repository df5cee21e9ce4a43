use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use picton_forms::{FieldSchema, FormTemplate, FormValues, find_builtin, values_from_json_for};
use serde_json::Value;

/// Schema named on the command line, plus the template it came from.
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub schema: FieldSchema,
    pub template: Option<FormTemplate>,
}

/// Resolves `--schema`: an existing file first, then a built-in template key.
///
/// Files may hold a bare field list, a `{"fields": [...]}` object or a whole
/// template with a `field_schema` member.
pub fn load_schema(arg: &str) -> Result<LoadedSchema> {
    let path = Path::new(arg);
    if path.is_file() {
        let value = read_json(path)?;
        if value.get("field_schema").is_some() {
            let template: FormTemplate = serde_json::from_value(value)
                .with_context(|| format!("invalid template in {}", path.display()))?;
            return Ok(LoadedSchema {
                schema: template.field_schema.clone(),
                template: Some(template),
            });
        }
        let schema = FieldSchema::from_value(value)
            .with_context(|| format!("invalid schema in {}", path.display()))?;
        return Ok(LoadedSchema {
            schema,
            template: None,
        });
    }

    let template = find_builtin(arg)
        .with_context(|| format!("`{arg}` is neither a schema file nor a built-in template"))?;
    tracing::debug!(template = %template.name, "using built-in template");
    Ok(LoadedSchema {
        schema: template.field_schema.clone(),
        template: Some(template.clone()),
    })
}

/// Reads a values file, decoding group entries by their shape in `schema`.
pub fn load_values(schema: &FieldSchema, path: &Path) -> Result<FormValues> {
    let value = read_json(path)?;
    values_from_json_for(schema, value)
        .with_context(|| format!("invalid values in {}", path.display()))
}

pub fn read_json(path: &Path) -> Result<Value> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
