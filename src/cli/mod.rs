//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

/// jm - Rank job postings against a resume
#[derive(Parser, Debug)]
#[command(name = "jm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable machine-readable JSON output.
    /// Ideal for agents and scripts that need structured output.
    #[arg(long, short = 'm', visible_alias = "machine", global = true)]
    pub robot: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/jm/config.toml, then ./jm.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank a job corpus against a resume
    Recommend(commands::recommend::RecommendArgs),

    /// List the skills detected in a resume
    Skills(commands::skills::SkillsArgs),

    /// Show the effective configuration
    Config(commands::config::ConfigArgs),
}
