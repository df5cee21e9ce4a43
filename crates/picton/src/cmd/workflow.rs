use anyhow::Result;
use clap::Args;
use picton_forms::find_builtin;
use picton_workflow::builtin_workflow;

use crate::config::{OutputFormat, PictonConfig};

#[derive(Args, Debug, Clone)]
pub struct WorkflowArgs {
    /// Built-in template key (name, part of the name, or id)
    #[arg(long, value_name = "TEMPLATE")]
    pub template: String,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub fn run(args: WorkflowArgs, config: &PictonConfig) -> Result<()> {
    let template = find_builtin(&args.template)?;
    let workflow = builtin_workflow(&template.name);
    match config.format(args.format) {
        OutputFormat::Text => {
            println!("{}", template.name);
            for step in workflow.steps() {
                let position = step.approval_position.as_deref().unwrap_or("-");
                let optional = if step.required { "" } else { " (optional)" };
                println!(
                    "{}. {} {}{}",
                    step.order,
                    step.approver_role.as_str(),
                    position,
                    optional
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(workflow.steps())?),
    }
    Ok(())
}
