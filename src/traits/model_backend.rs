use async_trait::async_trait;

use crate::implementations::model_client::ClientError;
use crate::models::common::ModelRef;

/// A single chat completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: ModelRef,
    pub system: String,
    pub prompt: String,
    /// Ask the provider for a JSON object reply
    pub json_mode: bool,
}

/// Transport to a hosted model
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ClientError>;
}
