use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, info };
use serde_json::{ json, Value };

use crate::errors::{ MentorError, MentorResult };
use crate::implementations::prompts;
use crate::models::common::{ CapabilityId, ModelRef };
use crate::models::schema::ResponseSchema;
use crate::traits::invocable::Invocable;
use crate::traits::model_backend::{ CompletionRequest, ModelBackend };

/// One model, one instruction set, one response schema
pub struct SingleModelCapability {
    id: CapabilityId,
    model: ModelRef,
    system: String,
    instructions: String,
    schema: ResponseSchema,
    template: String,
    backend: Arc<dyn ModelBackend>,
}

impl SingleModelCapability {
    pub fn new(
        id: CapabilityId,
        model: ModelRef,
        schema: ResponseSchema,
        backend: Arc<dyn ModelBackend>
    ) -> Self {
        Self {
            id,
            model,
            system: prompts::system_role(id).to_string(),
            instructions: prompts::instructions(id).to_string(),
            schema,
            template: prompts::DEFAULT_CAPABILITY_TEMPLATE.to_string(),
            backend,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Fill the template with instructions, schema description and payload
    pub fn render_prompt(&self, payload: &Value) -> String {
        let input = match payload {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        };

        let mut params = HashMap::new();
        params.insert("instructions", self.instructions.clone());
        params.insert("schema", self.schema.describe());
        params.insert("input", input);

        render_template(&self.template, &params)
    }
}

#[async_trait]
impl Invocable for SingleModelCapability {
    fn id(&self) -> CapabilityId {
        self.id
    }

    async fn invoke(&self, payload: &Value) -> MentorResult<Value> {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: self.system.clone(),
            prompt: self.render_prompt(payload),
            json_mode: self.schema.is_json(),
        };

        debug!("{} -> {}", self.id, self.model);
        let reply = self.backend
            .complete(&request).await
            .map_err(|e| e.into_mentor_error(self.id))?;

        if self.schema.is_json() {
            parse_json_reply(&reply).map_err(|message| {
                MentorError::invalid_response(self.id.as_str(), message)
            })
        } else {
            Ok(Value::String(reply))
        }
    }
}

/// Members are consulted in turn; the coordinator writes the final answer
pub struct CollaborativeCapability {
    id: CapabilityId,
    members: Vec<Arc<dyn Invocable>>,
    coordinator: Arc<dyn Invocable>,
}

impl CollaborativeCapability {
    pub fn new(
        id: CapabilityId,
        members: Vec<Arc<dyn Invocable>>,
        coordinator: Arc<dyn Invocable>
    ) -> Self {
        Self { id, members, coordinator }
    }
}

#[async_trait]
impl Invocable for CollaborativeCapability {
    fn id(&self) -> CapabilityId {
        self.id
    }

    async fn invoke(&self, payload: &Value) -> MentorResult<Value> {
        let mut contributions = Vec::with_capacity(self.members.len());

        for member in &self.members {
            info!("{}: consulting {}", self.id, member.id());
            let output = member.invoke(payload).await?;
            contributions.push(json!({
                "member": member.id().as_str(),
                "output": output,
            }));
        }

        info!("{}: {} contributions handed to coordinator", self.id, contributions.len());
        self.coordinator.invoke(
            &json!({
                "input": payload,
                "contributions": contributions,
            })
        ).await
    }
}

/// Render a template with `{{name}}` placeholders
///
/// Single left-to-right pass: substituted values are never scanned again, so a
/// payload that itself contains `{{schema}}` reaches the model verbatim.
/// Unknown placeholders are left as written.
pub fn render_template(template: &str, params: &HashMap<&str, String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let key = &after[..close];
                match params.get(key) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(key);
                        result.push_str("}}");
                    }
                }
                rest = &after[close + 2..];
            }
            None => {
                result.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);

    result.trim().to_string()
}

/// Remove a surrounding Markdown code fence, if any
pub fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Decode a model reply that should be a JSON object
pub fn parse_json_reply(reply: &str) -> Result<Value, String> {
    let body = strip_code_fences(reply);
    if body.is_empty() {
        return Err("empty reply".to_string());
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => Ok(value),
        Err(first_error) => {
            // Models sometimes wrap the object in prose.
            let (Some(start), Some(end)) = (body.find('{'), body.rfind('}')) else {
                return Err(format!("reply is not JSON: {}", first_error));
            };
            if end <= start {
                return Err(format!("reply is not JSON: {}", first_error));
            }
            serde_json
                ::from_str::<Value>(&body[start..=end])
                .map_err(|_| format!("reply is not JSON: {}", first_error))
        }
    }
}
