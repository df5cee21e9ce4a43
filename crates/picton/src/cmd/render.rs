use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use picton_forms::{build_render_payload, initialize_with, render_json_ui, render_text};

use crate::config::{OutputFormat, PictonConfig};
use crate::schema_arg::{load_schema, load_values};

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Schema file or built-in template key
    #[arg(long, value_name = "SCHEMA")]
    pub schema: String,
    /// Current values; defaults are used when omitted
    #[arg(long, value_name = "values.json")]
    pub values: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub fn run(args: RenderArgs, config: &PictonConfig) -> Result<()> {
    let loaded = load_schema(&args.schema)?;
    let values = match &args.values {
        Some(path) => load_values(&loaded.schema, path)?,
        None => initialize_with(&loaded.schema, &config.defaults()),
    };
    let payload = build_render_payload(&loaded.schema, &values);
    match config.format(args.format) {
        OutputFormat::Text => println!("{}", render_text(&payload)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?)
        }
    }
    Ok(())
}
