pub mod capabilities;
pub mod config;
pub mod gateway;
pub mod mentor;
pub mod model_client;
pub mod notes_pipeline;
pub mod pacing;
pub mod prompts;
pub mod stage_pipeline;
