use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use picton_forms::{Replacements, fill_template, unused_fields};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::config::PictonConfig;
use crate::schema_arg::{LoadedSchema, load_schema, load_values};

#[derive(Args, Debug, Clone)]
pub struct CheckLatexArgs {
    /// Schema file or built-in template key
    #[arg(long, value_name = "SCHEMA")]
    pub schema: String,
    /// LaTeX source; defaults to the template's file under `templates_dir`
    #[arg(long, value_name = "FILE")]
    pub latex: Option<PathBuf>,
    /// Fail when any field has no placeholder
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FillLatexArgs {
    /// Schema file or built-in template key
    #[arg(long, value_name = "SCHEMA")]
    pub schema: String,
    #[arg(long, value_name = "values.json")]
    pub values: PathBuf,
    /// LaTeX source; defaults to the template's file under `templates_dir`
    #[arg(long, value_name = "FILE")]
    pub latex: Option<PathBuf>,
    /// Date printed for `$CURRENT_DATE$`, as YYYY-MM-DD; defaults to today
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub date: Option<Date>,
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub fn check(args: CheckLatexArgs, config: &PictonConfig) -> Result<()> {
    let loaded = load_schema(&args.schema)?;
    let latex = read_latex(args.latex.as_deref(), &loaded, config)?;
    let unused = unused_fields(&loaded.schema, &latex);
    for field in &unused {
        tracing::warn!(field = %field, "field has no placeholder in the LaTeX template");
        eprintln!("warning: field `{field}` has no placeholder in the LaTeX template");
    }
    if args.strict && !unused.is_empty() {
        bail!(
            "check-latex: {} unused field(s) treated as errors (--strict)",
            unused.len()
        );
    }
    if unused.is_empty() {
        println!("every field has a placeholder");
    }
    Ok(())
}

pub fn fill(args: FillLatexArgs, config: &PictonConfig) -> Result<()> {
    let loaded = load_schema(&args.schema)?;
    let values = load_values(&loaded.schema, &args.values)?;
    let latex = read_latex(args.latex.as_deref(), &loaded, config)?;
    let today = args
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let replacements = Replacements::for_submission(&loaded.schema, &values, &latex, today);
    tracing::debug!(placeholders = replacements.len(), "filling LaTeX template");
    super::emit(&fill_template(&latex, &replacements), args.out.as_deref())
}

fn read_latex(
    explicit: Option<&Path>,
    loaded: &LoadedSchema,
    config: &PictonConfig,
) -> Result<String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => template_source(loaded, config)?,
    };
    fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

fn template_source(loaded: &LoadedSchema, config: &PictonConfig) -> Result<PathBuf> {
    let template = loaded
        .template
        .as_ref()
        .ok_or_else(|| anyhow!("--latex is required when the schema is not a template"))?;
    let dir = config
        .templates_dir
        .as_ref()
        .ok_or_else(|| anyhow!("--latex is required when templates_dir is not configured"))?;
    Ok(dir.join(template.latex_path()))
}

fn parse_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|err| err.to_string())
}
