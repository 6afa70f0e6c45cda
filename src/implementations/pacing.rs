use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::models::common::CapabilityId;
use crate::traits::pacer::Pacer;

/// Sleeps a fixed time between dependent calls to stay under provider rate limits
#[derive(Debug, Clone, Copy)]
pub struct FixedDelayPacer(pub Duration);

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self, previous: CapabilityId) {
        if self.0.is_zero() {
            return;
        }
        debug!("Pausing {:?} after {}", self.0, previous);
        tokio::time::sleep(self.0).await;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self, _previous: CapabilityId) {}
}
