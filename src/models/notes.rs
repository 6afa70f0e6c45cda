use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::schema::ResponseSchema;

/// Problem and approach analysis of a piece of code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExplanation {
    pub problem_statement: String,
    pub approach_summary: String,
    #[serde(default)]
    pub detailed_approach: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub code_walkthrough: String,
    pub edge_cases: String,
    pub key_concepts: String,
}

impl CodeExplanation {
    pub const SCHEMA: ResponseSchema = ResponseSchema::json("code_explanation", &[
        "problem_statement",
        "approach_summary",
        "time_complexity",
        "space_complexity",
        "code_walkthrough",
        "edge_cases",
        "key_concepts",
    ]);
}

/// Step-by-step execution trace on a chosen example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleTrace {
    pub example_input: String,
    pub step_by_step_trace: String,
    #[serde(default)]
    pub visual_representation: String,
    #[serde(default)]
    pub intermediate_outputs: String,
    pub final_result: String,
    #[serde(default)]
    pub alternative_examples: String,
}

impl ExampleTrace {
    pub const SCHEMA: ResponseSchema = ResponseSchema::json("example_trace", &[
        "example_input",
        "step_by_step_trace",
        "final_result",
    ]);
}

/// Study notes assembled from an explanation and an example trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesDocument {
    pub problem_restatement: String,
    pub approach_summary: String,
    pub complexity_analysis: String,
    pub code_walkthrough: String,
    pub edge_cases: String,
    pub key_concepts: String,
    pub example_trace: String,
    pub visual_aid: String,
    pub final_result: String,
}

impl NotesDocument {
    /// Field union of the two analyses; no content is derived here.
    pub fn assemble(explanation: CodeExplanation, trace: ExampleTrace) -> Self {
        let approach_summary = if explanation.detailed_approach.trim().is_empty() {
            explanation.approach_summary
        } else {
            format!("{}\n\n{}", explanation.approach_summary, explanation.detailed_approach)
        };

        let mut example_trace = format!(
            "Input: {}\n\n{}",
            trace.example_input,
            trace.step_by_step_trace
        );
        if !trace.intermediate_outputs.trim().is_empty() {
            example_trace.push_str("\n\nIntermediate results:\n");
            example_trace.push_str(&trace.intermediate_outputs);
        }

        let mut final_result = trace.final_result;
        if !trace.alternative_examples.trim().is_empty() {
            final_result.push_str("\n\nOther examples:\n");
            final_result.push_str(&trace.alternative_examples);
        }

        Self {
            problem_restatement: explanation.problem_statement,
            approach_summary,
            complexity_analysis: format!(
                "Time: {}\nSpace: {}",
                explanation.time_complexity,
                explanation.space_complexity
            ),
            code_walkthrough: explanation.code_walkthrough,
            edge_cases: explanation.edge_cases,
            key_concepts: explanation.key_concepts,
            example_trace,
            visual_aid: trace.visual_representation,
            final_result,
        }
    }

    /// Markdown rendering, used as the finalizer's input
    pub fn to_markdown(&self) -> String {
        let mut sections = vec![
            ("Problem", &self.problem_restatement),
            ("Approach", &self.approach_summary),
            ("Complexity", &self.complexity_analysis),
            ("Code Walkthrough", &self.code_walkthrough),
            ("Edge Cases", &self.edge_cases),
            ("Key Concepts", &self.key_concepts),
            ("Example Trace", &self.example_trace),
        ];
        if !self.visual_aid.trim().is_empty() {
            sections.push(("Visual Aid", &self.visual_aid));
        }
        sections.push(("Final Result", &self.final_result));

        sections
            .into_iter()
            .map(|(title, body)| format!("## {}\n\n{}\n", title, body.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Finalized notes as stored in the session and shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedNotes {
    pub document: NotesDocument,
    pub rendered: String,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedNotes {
    /// File name for the Markdown download
    pub fn file_name(&self) -> String {
        format!("dsa_notes_{}.md", self.generated_at.timestamp())
    }
}

/// The finalizer replies in free-form Markdown
pub const FINALIZED_NOTES_SCHEMA: ResponseSchema = ResponseSchema::text("finalized_notes");
