//! jm skills - Show the skills detected in a resume

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output;
use crate::error::Result;
use crate::recommend::extract_skills;

#[derive(Args, Debug)]
pub struct SkillsArgs {
    /// Resume text file (`-` reads stdin)
    #[arg(long, short = 'r', conflicts_with = "text")]
    pub resume: Option<PathBuf>,

    /// Resume text given inline
    #[arg(long, short = 't')]
    pub text: Option<String>,
}

pub fn run(ctx: &AppContext, args: &SkillsArgs) -> Result<()> {
    let resume = super::read_resume(args.resume.as_deref(), args.text.as_deref())?;
    let skills = extract_skills(&resume);

    if ctx.robot_mode {
        return output::emit_json(&serde_json::json!({
            "status": "ok",
            "count": skills.len(),
            "skills": skills,
        }));
    }

    if skills.is_empty() {
        println!("{}", "No known skills found".dimmed());
        return Ok(());
    }
    println!("{} ({})", "Skills".bold(), skills.len());
    for skill in skills {
        println!("  - {skill}");
    }
    Ok(())
}
