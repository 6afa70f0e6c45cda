use std::collections::HashMap;
use std::sync::Arc;

use log::{ debug, info, warn };
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;

use crate::config::RetryPolicy;
use crate::errors::{ MentorError, MentorResult, RecoverableError };
use crate::models::common::CapabilityId;
use crate::models::schema::ResponseSchema;
use crate::traits::invocable::Invocable;

/// Single entry point for every capability call.
///
/// Retries transient failures with exponential backoff, then checks the reply
/// against the caller's schema and decodes it. Invalid replies are never retried.
pub struct Gateway {
    registry: HashMap<CapabilityId, Arc<dyn Invocable>>,
    retry: RetryPolicy,
}

impl Gateway {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            registry: HashMap::new(),
            retry,
        }
    }

    /// Register a capability under its own id, replacing any earlier one
    pub fn register(&mut self, capability: Arc<dyn Invocable>) {
        let id = capability.id();
        if self.registry.insert(id, capability).is_some() {
            debug!("Replaced capability {}", id);
        }
    }

    pub fn is_registered(&self, id: CapabilityId) -> bool {
        self.registry.contains_key(&id)
    }

    pub async fn invoke<T: DeserializeOwned>(
        &self,
        id: CapabilityId,
        payload: &Value,
        schema: &ResponseSchema
    ) -> MentorResult<T> {
        let capability = self.registry
            .get(&id)
            .ok_or_else(|| {
                MentorError::MissingConfiguration(format!("no capability registered for {}", id))
            })?;

        let raw = self.invoke_with_retry(capability.as_ref(), payload).await?;

        schema.validate(&raw).map_err(|message| {
            warn!("{} reply rejected: {}", id, message);
            MentorError::invalid_response(id.as_str(), message)
        })?;

        serde_json::from_value(raw).map_err(|e| {
            warn!("{} reply could not be decoded: {}", id, e);
            MentorError::invalid_response(id.as_str(), format!("{}: {}", schema.name, e))
        })
    }

    async fn invoke_with_retry(
        &self,
        capability: &dyn Invocable,
        payload: &Value
    ) -> MentorResult<Value> {
        let id = capability.id();
        let attempts = self.retry.max_attempts.max(1);

        for attempt in 0..attempts {
            info!("Invoking {} (attempt {}/{})", id, attempt + 1, attempts);

            match capability.invoke(payload).await {
                Ok(value) => {
                    return Ok(value);
                }
                Err(err) => {
                    if !err.is_recoverable() || attempt + 1 == attempts {
                        return Err(err);
                    }

                    let delay = self.retry.backoff_delay(attempt);
                    warn!("{} failed: {}; retrying in {:?}", id, err, delay);
                    sleep(delay).await;
                }
            }
        }

        Err(MentorError::SystemError(format!("{}: retry budget is zero", id)))
    }
}
