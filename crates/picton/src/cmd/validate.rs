use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use picton_forms::validate;

use crate::schema_arg::{load_schema, load_values};

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Schema file or built-in template key
    #[arg(long, value_name = "SCHEMA")]
    pub schema: String,
    #[arg(long, value_name = "values.json")]
    pub values: PathBuf,
}

/// Prints the report to stdout and fails with the report's notice.
pub fn run(args: ValidateArgs) -> Result<()> {
    let loaded = load_schema(&args.schema)?;
    let values = load_values(&loaded.schema, &args.values)?;
    let report = validate(&loaded.schema, &values);
    println!("{}", serde_json::to_string_pretty(&report)?);
    if let Some(notice) = report.notice() {
        bail!("{notice}");
    }
    Ok(())
}
