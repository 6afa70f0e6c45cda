use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::notes::GeneratedNotes;
use crate::models::workflow::WorkflowState;

/// State scoped to one user session. Nothing outlives the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub workflow: WorkflowState,
    notes: Option<GeneratedNotes>,
}

impl Session {
    pub fn new() -> Self {
        let started_at = Utc::now();
        Self {
            id: format!("session_{}", started_at.timestamp_millis()),
            started_at,
            workflow: WorkflowState::new(),
            notes: None,
        }
    }

    pub fn notes(&self) -> Option<&GeneratedNotes> {
        self.notes.as_ref()
    }

    /// Replace the stored notes, returning the previous ones
    pub fn store_notes(&mut self, notes: GeneratedNotes) -> Option<GeneratedNotes> {
        self.notes.replace(notes)
    }

    pub fn clear_notes(&mut self) {
        self.notes = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
