use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use picton_forms::{initialize_with, values_to_json};

use crate::config::PictonConfig;
use crate::schema_arg::load_schema;

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Schema file or built-in template key
    #[arg(long, value_name = "SCHEMA")]
    pub schema: String,
    /// Write the values here instead of stdout
    #[arg(long, value_name = "values.json")]
    pub out: Option<PathBuf>,
}

pub fn run(args: InitArgs, config: &PictonConfig) -> Result<()> {
    let loaded = load_schema(&args.schema)?;
    let values = initialize_with(&loaded.schema, &config.defaults());
    let json = serde_json::to_string_pretty(&values_to_json(&values))?;
    super::emit(&json, args.out.as_deref())
}
