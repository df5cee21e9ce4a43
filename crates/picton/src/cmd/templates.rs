use anyhow::Result;
use clap::Args;
use picton_forms::builtin_templates;
use serde_json::json;

use crate::config::{OutputFormat, PictonConfig};

#[derive(Args, Debug, Clone, Default)]
pub struct TemplatesArgs {
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Include inactive templates
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: TemplatesArgs, config: &PictonConfig) -> Result<()> {
    let templates: Vec<_> = builtin_templates()
        .iter()
        .filter(|template| args.all || template.is_active)
        .collect();
    match config.format(args.format) {
        OutputFormat::Text => {
            for template in templates {
                println!(
                    "{:>3}  {:<28} {:>2} fields  {}",
                    template.id,
                    template.name,
                    template.field_schema.fields.len(),
                    template.latex_path()
                );
            }
        }
        OutputFormat::Json => {
            let listing: Vec<_> = templates
                .iter()
                .map(|template| {
                    json!({
                        "id": template.id,
                        "name": template.name,
                        "description": template.description,
                        "fields": template.field_schema.fields.len(),
                        "required_approvals": template.required_approvals,
                        "latex_template_path": template.latex_path(),
                        "form_type": template.form_type_code(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }
    Ok(())
}
