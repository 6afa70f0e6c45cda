use anyhow::{ Context, Result };
use std::fs;
use std::path::{ Path, PathBuf };

use algomentor::implementations::mentor::Mentor;
use algomentor::models::Session;

use crate::cli::ui;

/// Notes generation command
pub async fn execute(
    mentor: &Mentor,
    session: &mut Session,
    code_path: &Path,
    output_path: Option<&Path>
) -> Result<()> {
    ui::print_header("AlgoMentor: DSA Notes");

    let code = fs
        ::read_to_string(code_path)
        .with_context(|| format!("Failed to read code file {}", code_path.display()))?;
    ui::print_info(&format!("Loaded {} lines of code", code.lines().count()));

    let spinner = ui::spinner_with_message("Analyzing code and generating notes...");
    let notes = match mentor.notes.generate(session, &code).await {
        Ok(notes) => {
            spinner.finish_with_message("Notes generated successfully!");
            notes
        }
        Err(err) => {
            spinner.finish_and_clear();
            return Err(err.into());
        }
    };

    ui::print_text(&notes.rendered);

    let path = output_path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(notes.file_name()));
    fs::write(&path, &notes.rendered)?;
    ui::print_success(&format!("Notes saved to {}", path.display()));

    Ok(())
}
