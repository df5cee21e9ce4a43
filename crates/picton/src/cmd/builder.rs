use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use picton_forms::{
    BUILDER_FIELD_TYPES, FieldKind, FieldPatch, FieldSchema, add_field, parse_options_csv,
    remove_field, update_field,
};

use crate::schema_arg::load_schema;

#[derive(Subcommand, Debug, Clone)]
pub enum BuilderCommand {
    /// Append a new required text field
    Add(TargetArgs),
    /// Remove the field at an index
    Remove(RemoveArgs),
    /// Change properties of the field at an index
    Update(UpdateArgs),
    /// List the field types offered by the builder
    Types,
}

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Schema file or built-in template key
    #[arg(long, value_name = "SCHEMA")]
    pub schema: String,
    /// Write the new schema here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long)]
    pub index: usize,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    #[arg(long)]
    pub index: usize,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long, value_name = "BOOL")]
    pub required: Option<bool>,
    /// Comma separated option values
    #[arg(long, value_name = "A,B,C")]
    pub options: Option<String>,
    #[arg(long)]
    pub placeholder: Option<String>,
    /// Default value as JSON, e.g. `"Fall"` or `true`
    #[arg(long = "default", value_name = "JSON")]
    pub default_value: Option<String>,
    #[arg(long, value_name = "BOOL")]
    pub full_width: Option<bool>,
}

impl UpdateArgs {
    fn patch(&self) -> Result<FieldPatch> {
        let default_value = self
            .default_value
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()
            .context("--default must be valid JSON")?;
        let options = self.options.as_deref().map(|raw| {
            if raw.trim().is_empty() {
                Vec::new()
            } else {
                parse_options_csv(raw)
            }
        });
        Ok(FieldPatch {
            name: self.name.clone(),
            kind: self.kind.clone().map(FieldKind::from),
            label: self.label.clone(),
            required: self.required,
            options,
            placeholder: self.placeholder.clone(),
            default_value,
            full_width: self.full_width,
        })
    }
}

pub fn run(command: BuilderCommand) -> Result<()> {
    match command {
        BuilderCommand::Add(target) => {
            let schema = load_schema(&target.schema)?.schema;
            write(&add_field(&schema), &target)
        }
        BuilderCommand::Remove(args) => {
            let schema = load_schema(&args.target.schema)?.schema;
            write(&remove_field(&schema, args.index)?, &args.target)
        }
        BuilderCommand::Update(args) => {
            let schema = load_schema(&args.target.schema)?.schema;
            let patch = args.patch()?;
            if let Some(FieldKind::Unsupported(kind)) = &patch.kind {
                tracing::warn!(kind = %kind, "field type is not offered by the builder");
            }
            write(&update_field(&schema, args.index, patch)?, &args.target)
        }
        BuilderCommand::Types => {
            for (kind, label) in BUILDER_FIELD_TYPES {
                println!("{:<10} {label}", kind.as_str());
            }
            Ok(())
        }
    }
}

fn write(schema: &FieldSchema, target: &TargetArgs) -> Result<()> {
    let duplicates = schema.duplicate_names();
    if !duplicates.is_empty() {
        tracing::warn!(?duplicates, "schema contains duplicate field names");
    }
    super::emit(&schema.to_json_pretty()?, target.out.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(index: usize) -> UpdateArgs {
        UpdateArgs {
            target: TargetArgs {
                schema: "schema.json".into(),
                out: None,
            },
            index,
            name: None,
            kind: None,
            label: None,
            required: None,
            options: None,
            placeholder: None,
            default_value: None,
            full_width: None,
        }
    }

    #[test]
    fn patch_parses_options_and_default() {
        let mut args = update(0);
        args.kind = Some("radio".into());
        args.options = Some("Fall, Spring ,Summer".into());
        args.default_value = Some("\"Fall\"".into());
        let patch = args.patch().expect("patch");
        assert_eq!(patch.kind, Some(FieldKind::Radio));
        let options: Vec<_> = patch
            .options
            .expect("options")
            .iter()
            .map(|option| option.value().to_string())
            .collect();
        assert_eq!(options, vec!["Fall", "Spring", "Summer"]);
        assert_eq!(patch.default_value, Some(serde_json::json!("Fall")));
    }

    #[test]
    fn blank_options_clear_the_list() {
        let mut args = update(0);
        args.options = Some("  ".into());
        assert_eq!(args.patch().expect("patch").options, Some(Vec::new()));
    }

    #[test]
    fn invalid_default_is_rejected() {
        let mut args = update(0);
        args.default_value = Some("not json".into());
        assert!(args.patch().is_err());
    }
}
