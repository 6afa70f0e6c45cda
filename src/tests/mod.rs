
mod capability_tests;
mod model_client_tests;
mod notes_pipeline_tests;
mod workflow_state_tests;
