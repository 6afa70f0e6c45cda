use std::path::Path;
use std::sync::Arc;

use anyhow::{ Context, Result };
use clap::Parser;
use dotenv::dotenv;
use log::{ debug, info };

use algomentor::implementations::config::MentorConfig;
use algomentor::{ LLMClient, Mentor, Session };

mod cli;
use cli::{ Commands, MentorCli };

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the command line arguments
    let cli = MentorCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    if let Err(e) = dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let config = load_config(cli.config.as_deref())?;

    println!("AlgoMentor - from brute force to optimal, one stage at a time");

    match &cli.command {
        Commands::Solve { problem, problem_file, example, through, interactive, export } => {
            let mentor = build_mentor(&config)?;
            let mut session = Session::new();
            cli::commands::solve::execute(
                &mentor,
                &mut session,
                problem.as_deref(),
                problem_file.as_deref(),
                *example,
                through.as_deref(),
                *interactive,
                export.as_deref()
            ).await?;
        }

        Commands::Notes { code, output } => {
            let mentor = build_mentor(&config)?;
            let mut session = Session::new();
            cli::commands::notes::execute(&mentor, &mut session, code, output.as_deref()).await?;
        }

        Commands::Check => {
            cli::commands::check::execute(&config)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<MentorConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            MentorConfig::from_file(path).with_context(|| format!("Invalid config file {}", path.display()))
        }
        None => Ok(MentorConfig::default()),
    }
}

/// Credentials are resolved once here; a missing key stops the run before any call
fn build_mentor(config: &MentorConfig) -> Result<Mentor> {
    let credentials = config.resolve_credentials()?;
    let client = LLMClient::new(config, credentials)?;
    Ok(Mentor::from_config(config, Arc::new(client)))
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
