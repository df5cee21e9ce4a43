use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{
    self, builder::BuilderCommand, dashboard::DashboardArgs, init::InitArgs,
    latex::CheckLatexArgs, latex::FillLatexArgs, render::RenderArgs, templates::TemplatesArgs,
    validate::ValidateArgs, workflow::WorkflowArgs,
};
use crate::config::PictonConfig;

#[derive(Parser, Debug)]
#[command(
    name = "picton",
    about = "Author, validate and render Picton form templates",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to a config.toml; defaults to the per-user config directory
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the default values for a schema
    Init(InitArgs),
    /// Validate a values file against a schema
    Validate(ValidateArgs),
    /// Render a form as text or a JSON UI payload
    Render(RenderArgs),
    /// List the built-in form templates
    Templates(TemplatesArgs),
    /// Report schema fields without a LaTeX placeholder
    CheckLatex(CheckLatexArgs),
    /// Substitute form values into a LaTeX template
    FillLatex(FillLatexArgs),
    /// Edit a schema one field at a time
    #[command(subcommand)]
    Builder(BuilderCommand),
    /// Show the sidebar and dashboard for a user profile
    Dashboard(DashboardArgs),
    /// Show the approval steps of a template
    Workflow(WorkflowArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = PictonConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Init(args) => cmd::init::run(args, &config),
        Commands::Validate(args) => cmd::validate::run(args),
        Commands::Render(args) => cmd::render::run(args, &config),
        Commands::Templates(args) => cmd::templates::run(args, &config),
        Commands::CheckLatex(args) => cmd::latex::check(args, &config),
        Commands::FillLatex(args) => cmd::latex::fill(args, &config),
        Commands::Builder(command) => cmd::builder::run(command),
        Commands::Dashboard(args) => cmd::dashboard::run(args, &config),
        Commands::Workflow(args) => cmd::workflow::run(args, &config),
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn parses_render_with_global_flags() {
        let cli = Cli::try_parse_from([
            "picton",
            "--verbose",
            "render",
            "--schema",
            "graduate",
            "--format",
            "json",
            "--config",
            "picton.toml",
        ])
        .expect("expected CLI to parse");
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("picton.toml")));
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.schema, "graduate");
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert!(args.values.is_none());
            }
            _ => panic!("expected render args"),
        }
    }

    #[test]
    fn parses_builder_update() {
        let cli = Cli::try_parse_from([
            "picton",
            "builder",
            "update",
            "--schema",
            "schema.json",
            "--index",
            "2",
            "--type",
            "select",
            "--options",
            "Fall, Spring",
            "--required",
            "false",
        ])
        .expect("expected CLI to parse");
        match cli.command {
            Commands::Builder(BuilderCommand::Update(args)) => {
                assert_eq!(args.index, 2);
                assert_eq!(args.kind.as_deref(), Some("select"));
                assert_eq!(args.options.as_deref(), Some("Fall, Spring"));
                assert_eq!(args.required, Some(false));
            }
            _ => panic!("expected builder update args"),
        }
    }

    #[test]
    fn parses_check_latex_kebab_case() {
        let cli = Cli::try_parse_from([
            "picton",
            "check-latex",
            "--schema",
            "withdrawal",
            "--latex",
            "form.tex",
            "--strict",
        ])
        .expect("expected CLI to parse");
        match cli.command {
            Commands::CheckLatex(args) => {
                assert_eq!(args.latex, Some(PathBuf::from("form.tex")));
                assert!(args.strict);
            }
            _ => panic!("expected check-latex args"),
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["picton"]).is_err());
    }
}
