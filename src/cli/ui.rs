use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Confirm, Input, Select };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use algomentor::models::{ Stage, StagePhase, StageRecord, WorkflowState, EXAMPLE_PROBLEMS };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping
pub fn print_text(text: &str) {
    let width = Term::stdout().size().1 as usize;
    let mut in_code = false;
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_code = !in_code;
            println!("{}", line.dimmed());
        } else if in_code {
            // Code is never re-wrapped.
            println!("{}", line.cyan());
        } else if line.starts_with('#') {
            println!("{}", line.bold());
        } else if line.starts_with('-') || line.trim().is_empty() {
            println!("{}", line);
        } else {
            for wrapped_line in wrap(line, width.saturating_sub(10).max(40)) {
                println!("{}", wrapped_line);
            }
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Print a stage phase with color
pub fn print_stage_status(stage: Stage, phase: StagePhase) {
    let marker = match phase {
        StagePhase::Done => format!("✓ {}", phase).green().bold(),
        StagePhase::Failed => format!("✗ {}", phase).red().bold(),
        StagePhase::NotStarted => format!("· {}", phase).dimmed(),
        _ => format!("… {}", phase).yellow().bold(),
    };
    println!("  {:<18} {}", stage.to_string(), marker);
}

/// Progress over the three stages
pub fn print_progress(state: &WorkflowState) {
    let done = state.completed_count();
    let filled = "#".repeat(done * 10);
    let empty = "-".repeat((Stage::ALL.len() - done) * 10);
    println!(
        "\n{} [{}{}] {}% ({}/{} stages)",
        "Progress".bold(),
        filled.green(),
        empty,
        state.progress(),
        done,
        Stage::ALL.len()
    );
    for stage in Stage::ALL {
        print_stage_status(stage, state.status(stage));
        if let Some(error) = state.last_error(stage) {
            println!("      {}", error.red());
        }
    }
    println!();
}

/// Show everything a completed stage produced
pub fn display_stage_record(record: &StageRecord) {
    print_header(&record.stage.to_string());

    if let Some(analysis) = &record.analysis {
        print_result("Problem", "");
        print_text(&analysis.problem_statement);
        if !analysis.constraints.trim().is_empty() {
            print_result("Constraints", "");
            print_text(&analysis.constraints);
        }
        if !analysis.examples.is_empty() {
            print_result("Examples", "");
            for example in &analysis.examples {
                println!("- {}", example);
            }
        }
        println!();
    }

    print_result("Approach", "");
    print_text(&record.result.approach);
    println!();
    print_result("Algorithm", "");
    print_text(&record.result.algorithm);
    println!();

    if let Some(output) = &record.test_output {
        print_result("Test run", "");
        print_text(output);
        println!();
    }

    print_result("Code", "");
    print_text(&format!("```python\n{}\n```", record.carried_code().trim()));
    println!();

    print_result("Time complexity", record.time_complexity());
    print_result("Space complexity", record.space_complexity());
    if let Some(verified) = &record.verified {
        if !verified.libraries.trim().is_empty() {
            print_result("Libraries", &verified.libraries);
        }
    }
}

/// Read the problem statement interactively
pub fn get_problem() -> std::io::Result<String> {
    Input::with_theme(&get_theme())
        .with_prompt("Enter the problem statement")
        .interact_text()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Type a problem or start from one of the built-in examples
pub fn choose_problem() -> std::io::Result<String> {
    let mut items = vec!["Enter my own problem".to_string()];
    items.extend(
        EXAMPLE_PROBLEMS.iter()
            .enumerate()
            .map(|(i, example)| format!("Example {}: {}", i + 1, example.label(70)))
    );

    match select_action("Choose a problem", &items)? {
        0 => get_problem(),
        choice => Ok(EXAMPLE_PROBLEMS[choice - 1].statement.to_string()),
    }
}

/// Pick one of several actions
pub fn select_action(prompt: &str, items: &[String]) -> std::io::Result<usize> {
    Select::with_theme(&get_theme())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Confirm an action with the user
pub fn confirm_action(prompt: &str) -> std::io::Result<bool> {
    Confirm::with_theme(&get_theme())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
