pub mod builder;
pub mod dashboard;
pub mod init;
pub mod latex;
pub mod render;
pub mod templates;
pub mod validate;
pub mod workflow;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Writes `contents` to `out`, or to stdout when no path is given.
pub(crate) fn emit(contents: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{contents}"),
    }
    Ok(())
}
