use async_trait::async_trait;

use crate::models::common::CapabilityId;

/// Rate-limiting policy applied between dependent gateway calls
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Called after `previous` returned and before the next dependent call
    async fn pause(&self, previous: CapabilityId);
}
