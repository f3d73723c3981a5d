//! jm recommend - Rank a job corpus against a resume

use std::path::PathBuf;

use clap::Args;
use clap::builder::RangedU64ValueParser;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::corpus::load_jobs;
use crate::error::Result;
use crate::recommend::{Method, Recommendation, Recommender, extract_skills};

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Job corpus file (JSON array, or JSONL when the extension is .jsonl)
    #[arg(long, short = 'j')]
    pub jobs: PathBuf,

    /// Resume text file (`-` reads stdin)
    #[arg(long, short = 'r', conflicts_with = "text")]
    pub resume: Option<PathBuf>,

    /// Resume text given inline
    #[arg(long, short = 't')]
    pub text: Option<String>,

    /// Ranking method: hybrid, lexical, semantic, keyword
    #[arg(long)]
    pub method: Option<String>,

    /// Number of recommendations to return
    #[arg(long, short = 'n', value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub top_n: Option<usize>,
}

#[derive(Serialize)]
struct RecommendReport<'a> {
    status: &'static str,
    method: Method,
    count: usize,
    resume_skills: Vec<&'static str>,
    recommended_jobs: &'a [Recommendation],
}

pub fn run(ctx: &AppContext, args: &RecommendArgs) -> Result<()> {
    let resume = super::read_resume(args.resume.as_deref(), args.text.as_deref())?;
    let jobs = load_jobs(&args.jobs, &ctx.config.corpus)?;

    let method = Method::parse(
        args.method
            .as_deref()
            .unwrap_or(&ctx.config.recommend.method),
    );
    let top_n = args.top_n.unwrap_or(ctx.config.recommend.top_n);

    let recommender = Recommender::from_config(&ctx.model, &ctx.config);
    let recommendations = recommender.recommend(&jobs, &resume, method, top_n);
    debug!(path = %args.jobs.display(), top_n, "ranked corpus file");

    let report = RecommendReport {
        status: "ok",
        method,
        count: recommendations.len(),
        resume_skills: extract_skills(&resume),
        recommended_jobs: &recommendations,
    };

    if ctx.robot_mode {
        return output::emit_json(&report);
    }
    emit_human_report(&report);
    Ok(())
}

fn emit_human_report(report: &RecommendReport<'_>) {
    let mut layout = HumanLayout::new();
    layout.title("Job Recommendations");
    layout.kv("Method", report.method.as_str());
    let skills = if report.resume_skills.is_empty() {
        "none detected".to_string()
    } else {
        report.resume_skills.join(", ")
    };
    layout.kv("Resume skills", &skills);
    layout.blank();

    if report.recommended_jobs.is_empty() {
        layout.push_line("No jobs to recommend".dimmed().to_string());
        output::emit_human(layout);
        return;
    }

    for (rank, entry) in report.recommended_jobs.iter().enumerate() {
        layout.push_line(format!(
            "{:>3}. {} {} {}",
            rank + 1,
            format!("{:>5.1}", entry.similarity_score).green(),
            entry.job.position.bold(),
            format!("@ {}", entry.job.workplace).dimmed(),
        ));
        let mut detail = format!("     {} | {}", entry.job.working_mode.as_str(), entry.method);
        if let Some(matches) = entry.skill_matches {
            detail.push_str(&format!(" | {matches} skill matches"));
        }
        layout.push_line(detail.dimmed().to_string());
    }
    output::emit_human(layout);
}
