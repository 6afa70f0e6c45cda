use thiserror::Error;

use crate::models::common::{ Stage, StagePhase };

/// Custom error types for the AlgoMentor system
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MentorError {
    #[error("Transient error from {capability}: {message}")]
    Transient { capability: String, message: String },

    #[error("Invalid response from {capability}: {message}")]
    InvalidResponse { capability: String, message: String },

    #[error("Stage {running} is already running")]
    AlreadyRunning { running: Stage },

    #[error("Cannot start {stage}: {predecessor} is not done")]
    PredecessorNotDone { stage: Stage, predecessor: Stage },

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("{stage} failed while {phase}: {message}")]
    StageFailed { stage: Stage, phase: StagePhase, message: String },

    #[error("Notes generation failed: {0}")]
    NotesFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid transition for {stage}: {from} -> {to}")]
    InvalidTransition { stage: Stage, from: StagePhase, to: StagePhase },

    #[error("System error: {0}")]
    SystemError(String),
}

impl MentorError {
    pub fn transient(capability: impl Into<String>, message: impl Into<String>) -> Self {
        MentorError::Transient {
            capability: capability.into(),
            message: message.into(),
        }
    }

    pub fn invalid_response(capability: impl Into<String>, message: impl Into<String>) -> Self {
        MentorError::InvalidResponse {
            capability: capability.into(),
            message: message.into(),
        }
    }
}

/// Result type specific to AlgoMentor operations
pub type MentorResult<T> = Result<T, MentorError>;

/// Recoverable vs. non-recoverable errors
pub trait RecoverableError {
    fn is_recoverable(&self) -> bool;
    fn recovery_strategy(&self) -> Option<String>;
}

impl RecoverableError for MentorError {
    fn is_recoverable(&self) -> bool {
        matches!(self, MentorError::Transient { .. })
    }

    fn recovery_strategy(&self) -> Option<String> {
        match self {
            MentorError::Transient { .. } => Some("retry with backoff".to_string()),
            MentorError::StageFailed { stage, .. } => Some(format!("re-run {} from scratch", stage)),
            MentorError::NotesFailed(_) => Some("generate the notes again".to_string()),
            MentorError::AlreadyRunning { running } => Some(format!("wait for {} to finish", running)),
            MentorError::PredecessorNotDone { predecessor, .. } =>
                Some(format!("complete {} first", predecessor)),
            MentorError::MissingConfiguration(_) =>
                Some("set GROQ_API_KEY and GOOGLE_API_KEY or add keys to the config file".to_string()),
            _ => None,
        }
    }
}
