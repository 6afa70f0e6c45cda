use async_trait::async_trait;
use serde_json::Value;

use crate::errors::MentorResult;
use crate::models::common::CapabilityId;

/// A remote reasoning or code-execution capability.
///
/// Implementations perform exactly one logical call per `invoke` and never
/// retry; retries and schema checks belong to the gateway.
#[async_trait]
pub trait Invocable: Send + Sync {
    /// Identifier the capability is registered under
    fn id(&self) -> CapabilityId;

    /// Run the capability on a JSON payload, returning its raw JSON reply
    async fn invoke(&self, payload: &Value) -> MentorResult<Value>;
}
