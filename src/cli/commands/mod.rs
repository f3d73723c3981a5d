//! Command implementations

use std::io::Read;
use std::path::Path;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::{JmError, Result};

pub mod config;
pub mod recommend;
pub mod skills;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Recommend(args) => recommend::run(ctx, args),
        Commands::Skills(args) => skills::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}

/// Resume text from `--text`, a file, or stdin (`-`). Blank text is rejected.
pub(crate) fn read_resume(resume: Option<&Path>, text: Option<&str>) -> Result<String> {
    let raw = match (text, resume) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            return Err(JmError::InvalidInput(
                "provide resume text with --text or --resume".to_string(),
            ));
        }
    };

    if raw.trim().is_empty() {
        return Err(JmError::InvalidInput("resume text is empty".to_string()));
    }
    Ok(raw)
}
