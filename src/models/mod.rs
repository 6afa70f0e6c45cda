pub mod common;
pub mod schema;
pub mod solution;
pub mod notes;
pub mod workflow;
pub mod session;
pub mod catalog;

// Re-export common model types
pub use common::{ CapabilityId, ModelRef, Provider, Stage, StagePhase };
pub use schema::{ ResponseSchema, SchemaKind };
pub use solution::{ ProblemAnalysis, ProblemStatement, StageRecord, StageResult, VerifiedCode };
pub use notes::{ CodeExplanation, ExampleTrace, GeneratedNotes, NotesDocument };
pub use workflow::{ StageSlot, WorkflowState };
pub use session::Session;
pub use catalog::{ example_problem, ExampleProblem, EXAMPLE_PROBLEMS };
