use std::sync::Arc;

use chrono::Utc;
use log::{ debug, error, info };
use serde_json::{ json, Value };

use crate::errors::{ MentorError, MentorResult };
use crate::implementations::gateway::Gateway;
use crate::models::common::CapabilityId;
use crate::models::notes::{
    CodeExplanation,
    ExampleTrace,
    GeneratedNotes,
    NotesDocument,
    FINALIZED_NOTES_SCHEMA,
};
use crate::models::session::Session;
use crate::traits::pacer::Pacer;

/// Turns a piece of code into study notes: explain, trace, combine, finalize
pub struct NotesPipeline {
    gateway: Arc<Gateway>,
    pacer: Arc<dyn Pacer>,
}

impl NotesPipeline {
    pub fn new(gateway: Arc<Gateway>, pacer: Arc<dyn Pacer>) -> Self {
        Self { gateway, pacer }
    }

    /// Generate notes for `code` and store them in the session.
    ///
    /// On failure the session keeps whatever notes it had before.
    pub async fn generate(&self, session: &mut Session, code: &str) -> MentorResult<GeneratedNotes> {
        if code.trim().is_empty() {
            return Err(
                MentorError::InvalidInput("please enter some code before submitting".to_string())
            );
        }

        info!("Generating notes for {} characters of code", code.len());
        let notes = self.build(code).await.map_err(|err| {
            error!("Notes generation failed: {}", err);
            MentorError::NotesFailed(err.to_string())
        })?;

        if session.store_notes(notes.clone()).is_some() {
            debug!("Replaced earlier notes in {}", session.id);
        }
        Ok(notes)
    }

    async fn build(&self, code: &str) -> MentorResult<GeneratedNotes> {
        let payload = json!({ "code": code });

        let explanation: CodeExplanation = self.gateway.invoke(
            CapabilityId::NotesExplainer,
            &payload,
            &CodeExplanation::SCHEMA
        ).await?;
        self.pacer.pause(CapabilityId::NotesExplainer).await;

        let trace: ExampleTrace = self.gateway.invoke(
            CapabilityId::NotesTracer,
            &payload,
            &ExampleTrace::SCHEMA
        ).await?;

        let document = NotesDocument::assemble(explanation, trace);
        let draft = document.to_markdown();
        debug!("Combined notes draft: {} characters", draft.len());
        self.pacer.pause(CapabilityId::NotesTracer).await;

        let rendered: String = self.gateway.invoke(
            CapabilityId::NotesFinalizer,
            &Value::String(draft),
            &FINALIZED_NOTES_SCHEMA
        ).await?;

        Ok(GeneratedNotes {
            document,
            rendered,
            generated_at: Utc::now(),
        })
    }
}
