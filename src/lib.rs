pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ MentorOptions, RetryPolicy };
pub use errors::{ MentorError, MentorResult, RecoverableError };
pub use implementations::config::MentorConfig;
pub use implementations::gateway::Gateway;
pub use implementations::mentor::{ build_gateway, Mentor };
pub use implementations::model_client::LLMClient;
pub use implementations::notes_pipeline::NotesPipeline;
pub use implementations::stage_pipeline::StagePipeline;
pub use models::{
    CapabilityId,
    GeneratedNotes,
    NotesDocument,
    ProblemStatement,
    Session,
    Stage,
    StagePhase,
    StageRecord,
    WorkflowState,
};
pub use traits::{ Invocable, ModelBackend, Pacer };
