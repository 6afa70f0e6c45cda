use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "algomentor",
    about = "Walks an algorithm problem from brute force to the optimal solution",
    version,
    author,
    long_about = None
)]
pub struct MentorCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve a problem stage by stage
    Solve {
        /// Problem statement text
        #[arg(short, long, conflicts_with = "problem_file")]
        problem: Option<String>,

        /// File containing the problem statement
        #[arg(short = 'f', long)]
        problem_file: Option<PathBuf>,

        /// Start from a built-in example problem (1-4)
        #[arg(long, conflicts_with_all = ["problem", "problem_file"])]
        example: Option<usize>,

        /// Last stage to run (basic, sub-optimal, optimal)
        #[arg(short, long)]
        through: Option<String>,

        /// Ask before unlocking each stage
        #[arg(short, long, default_value = "false")]
        interactive: bool,

        /// Write the final workflow state as JSON
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Generate study notes for a piece of code
    Notes {
        /// Path to the code file
        #[arg(short = 'C', long)]
        code: PathBuf,

        /// Where to write the Markdown notes
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check configuration and credentials
    Check,
}
