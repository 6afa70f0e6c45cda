use anyhow::{ anyhow, Result };

use algomentor::implementations::config::MentorConfig;
use algomentor::models::Provider;

use crate::cli::ui;

/// Report the effective configuration and whether credentials resolve
pub fn execute(config: &MentorConfig) -> Result<()> {
    ui::print_header("AlgoMentor: Configuration Check");

    for provider in [Provider::Groq, Provider::Gemini] {
        ui::print_result(&format!("{} model", provider), &config.model(provider).model);
        ui::print_result(&format!("{} endpoint", provider), &config.endpoint(provider));
    }

    let options = config.options();
    ui::print_result("Attempts per call", &options.retry.max_attempts.to_string());
    ui::print_result("Retry base delay", &format!("{:?}", options.retry.base_delay));
    ui::print_result("Pacing delay", &format!("{:?}", options.pacing_delay));
    ui::print_result("Request timeout", &format!("{:?}", config.request_timeout()));
    ui::print_result("Verify basic stage", &options.verify_basic_stage.to_string());
    if !config.instructions.is_empty() {
        let mut overridden: Vec<&str> = config.instructions.keys().map(String::as_str).collect();
        overridden.sort_unstable();
        ui::print_result("Instruction overrides", &overridden.join(", "));
    }

    match config.resolve_credentials() {
        Ok(_) => {
            ui::print_success("All API keys found");
            Ok(())
        }
        Err(err) => {
            ui::print_error(&err.to_string());
            Err(anyhow!("configuration is incomplete"))
        }
    }
}
