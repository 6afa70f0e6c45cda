pub mod invocable;
pub mod model_backend;
pub mod pacer;

// Re-export traits
pub use invocable::Invocable;
pub use model_backend::{ CompletionRequest, ModelBackend };
pub use pacer::Pacer;
