use anyhow::{ anyhow, Context, Result };
use std::fs;
use std::path::Path;

use algomentor::errors::RecoverableError;
use algomentor::implementations::mentor::Mentor;
use algomentor::models::{ example_problem, Session, Stage, StagePhase };

use crate::cli::ui;

/// Staged solving command
pub async fn execute(
    mentor: &Mentor,
    session: &mut Session,
    problem: Option<&str>,
    problem_file: Option<&Path>,
    example: Option<usize>,
    through: Option<&str>,
    interactive: bool,
    export: Option<&Path>
) -> Result<()> {
    ui::print_header("AlgoMentor: Solve");

    let target = match through {
        Some(name) => name.parse::<Stage>().map_err(|e| anyhow!(e))?,
        None => Stage::Optimal,
    };

    let text = match (problem, problem_file, example) {
        (Some(text), _, _) => text.to_string(),
        (None, Some(path), _) =>
            fs
                ::read_to_string(path)
                .with_context(|| format!("Failed to read problem file {}", path.display()))?,
        (None, None, Some(number)) => {
            let example = example_problem(number)?;
            ui::print_info(&format!("Using example problem: {}", example.title));
            example.statement.to_string()
        }
        (None, None, None) if interactive => ui::choose_problem()?,
        (None, None, None) => {
            return Err(anyhow!("Provide a problem with --problem, --problem-file or --example"));
        }
    };
    session.workflow.submit_problem(&text)?;

    if interactive {
        run_interactive(mentor, session, target).await?;
    } else {
        for stage in Stage::ALL.into_iter().filter(|s| *s <= target) {
            if !run_one(mentor, session, stage).await {
                break;
            }
        }
        ui::print_progress(&session.workflow);
    }

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&session.workflow)?;
        fs::write(path, json)?;
        ui::print_success(&format!("Workflow exported to {}", path.display()));
    }

    Ok(())
}

/// Run one stage behind a spinner; true when it completed
async fn run_one(mentor: &Mentor, session: &mut Session, stage: Stage) -> bool {
    let spinner = ui::spinner_with_message(&format!("Running {}...", stage));
    let result = mentor.stages.run_stage(&mut session.workflow, stage).await;

    match result {
        Ok(record) => {
            spinner.finish_with_message(format!("{} complete", stage));
            ui::display_stage_record(&record);
            true
        }
        Err(err) => {
            spinner.finish_and_clear();
            ui::print_error(&err.to_string());
            if let Some(hint) = err.recovery_strategy() {
                ui::print_info(&format!("Try to {}", hint));
            }
            false
        }
    }
}

/// The next stage that can be unlocked, up to `target`
fn next_stage(session: &Session, target: Stage) -> Option<Stage> {
    Stage::ALL.into_iter()
        .filter(|s| *s <= target)
        .find(|s| session.workflow.status(*s) != StagePhase::Done)
}

async fn run_interactive(mentor: &Mentor, session: &mut Session, target: Stage) -> Result<()> {
    loop {
        ui::print_progress(&session.workflow);

        let next = next_stage(session, target);
        let mut items = Vec::new();
        if let Some(stage) = next {
            let verb = if session.workflow.status(stage) == StagePhase::Failed {
                "Retry"
            } else {
                "Unlock"
            };
            items.push(format!("{} {}", verb, stage));
        }
        items.push("Clear all".to_string());
        items.push("Quit".to_string());

        let choice = ui::select_action("What next?", &items)?;
        let offset = usize::from(next.is_some());

        match (next, choice) {
            (Some(stage), 0) => {
                run_one(mentor, session, stage).await;
            }
            (_, c) if c == offset => {
                if !ui::confirm_action("Clear the problem and every stage?")? {
                    continue;
                }
                session.workflow.reset();
                session.clear_notes();
                ui::print_info("Cleared. Pick a new problem to start again.");
                let text = ui::choose_problem()?;
                if let Err(err) = session.workflow.submit_problem(&text) {
                    ui::print_error(&err.to_string());
                    return Ok(());
                }
            }
            _ => {
                if next.is_none() {
                    ui::print_success("All stages complete!");
                }
                return Ok(());
            }
        }
    }
}
