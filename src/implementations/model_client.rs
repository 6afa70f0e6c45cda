use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use serde_json::Value;
use thiserror::Error;

use crate::errors::MentorError;
use crate::implementations::config::{ ConfigError, Credentials, MentorConfig };
use crate::models::common::{ CapabilityId, Provider };
use crate::traits::model_backend::{ CompletionRequest, ModelBackend };

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API error: {0}")] ApiError(String),

    #[error("Configuration error: {0}")] ConfigError(#[from] ConfigError),

    #[error("Failed to parse API response: {0}")] ParseError(String),

    #[error("Network error: {message}")] NetworkError {
        message: String,
        transient: bool,
    },

    #[error("HTTP error: {status} - {message}")] HttpError {
        status: u16,
        message: String,
    },

    #[error("Model returned an empty reply")] EmptyResponse,
}

impl ClientError {
    /// Timeouts, dropped connections, rate limits and server errors are worth retrying
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::NetworkError { transient, .. } => *transient,
            ClientError::HttpError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn into_mentor_error(self, capability: CapabilityId) -> MentorError {
        let name = capability.as_str();
        match self {
            ClientError::ConfigError(err) => MentorError::from(err),
            err if err.is_transient() => MentorError::transient(name, err.to_string()),
            err => MentorError::invalid_response(name, err.to_string()),
        }
    }
}

/// OpenAI-compatible request and response types
#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// HTTP client for the hosted models used by the capabilities
///
/// # API Keys
/// Keys come from the config file or from the environment:
///    - Groq: GROQ_API_KEY
///    - Gemini: GOOGLE_API_KEY
#[derive(Clone)]
pub struct LLMClient {
    http_client: reqwest::Client,
    credentials: Credentials,
    groq_endpoint: String,
    gemini_endpoint: String,
    temperature: f32,
    max_tokens: usize,
}

impl LLMClient {
    pub fn new(config: &MentorConfig, credentials: Credentials) -> Result<Self, ClientError> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::ApiError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            credentials,
            groq_endpoint: config.endpoint(Provider::Groq),
            gemini_endpoint: config.endpoint(Provider::Gemini),
            temperature: config.temperature.unwrap_or(0.2),
            max_tokens: config.max_tokens.unwrap_or(4096),
        })
    }

    async fn call_groq(&self, request: &CompletionRequest) -> Result<String, ClientError> {
        let chat_request = ChatRequest {
            model: request.model.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.prompt.clone(),
                }
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: request.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        debug!("Groq endpoint: {}", self.groq_endpoint);

        let response = self.http_client
            .post(&self.groq_endpoint)
            .header("Content-Type", "application/json")
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.key_for(Provider::Groq))
            )
            .json(&chat_request)
            .send().await
            .map_err(network_error)?;

        let response_json = read_json(response).await?;
        extract_openai_content(&response_json)
    }

    async fn call_gemini(&self, request: &CompletionRequest) -> Result<String, ClientError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.gemini_endpoint.trim_end_matches('/'),
            request.model.model
        );

        let mut generation_config =
            serde_json::json!({
            "temperature": self.temperature,
            "maxOutputTokens": self.max_tokens,
        });
        if request.json_mode {
            generation_config["responseMimeType"] = Value::from("application/json");
        }

        let gemini_request =
            serde_json::json!({
            "systemInstruction": { "parts": [{ "text": request.system }] },
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": request.prompt }]
                }
            ],
            "generationConfig": generation_config,
        });

        debug!("Gemini endpoint: {}", url);

        let response = self.http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", self.credentials.key_for(Provider::Gemini))
            .json(&gemini_request)
            .send().await
            .map_err(network_error)?;

        let response_json = read_json(response).await?;
        extract_gemini_content(&response_json)
    }
}

#[async_trait]
impl ModelBackend for LLMClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ClientError> {
        info!("Making LLM API request to {}", request.model);
        debug!("Prompt length: {} characters", request.prompt.len());

        let content = match request.model.provider {
            Provider::Groq => self.call_groq(request).await?,
            Provider::Gemini => self.call_gemini(request).await?,
        };

        if content.trim().is_empty() {
            warn!("{} returned an empty reply", request.model);
            return Err(ClientError::EmptyResponse);
        }

        debug!("Response content length: {} characters", content.len());
        Ok(content)
    }
}

fn network_error(e: reqwest::Error) -> ClientError {
    let transient = e.is_timeout() || e.is_connect();
    if e.is_timeout() {
        warn!("Request timed out");
    }
    if e.is_connect() {
        warn!("Connection error - check network connectivity");
    }
    ClientError::NetworkError {
        message: e.to_string(),
        transient,
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, ClientError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let error_text = response
            .text().await
            .unwrap_or_else(|_| "Failed to get error message".to_string());

        warn!("API error: HTTP {} - {}", status, error_text);
        return Err(ClientError::HttpError {
            status,
            message: error_text,
        });
    }

    let response_text = response.text().await.map_err(network_error)?;
    serde_json::from_str(&response_text).map_err(|e| {
        warn!("Failed to parse response as JSON: {}", e);
        ClientError::ParseError(format!("Invalid JSON response: {}", e))
    })
}

/// Pull the assistant message out of an OpenAI-style chat completion
pub fn extract_openai_content(response: &Value) -> Result<String, ClientError> {
    if let Some(message) = response["error"]["message"].as_str() {
        return Err(ClientError::ApiError(message.to_string()));
    }

    response["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(str::to_string)
        .ok_or_else(|| ClientError::ParseError("no message content in choices".to_string()))
}

/// Concatenate the text parts of the first Gemini candidate
pub fn extract_gemini_content(response: &Value) -> Result<String, ClientError> {
    if let Some(message) = response["error"]["message"].as_str() {
        return Err(ClientError::ApiError(message.to_string()));
    }

    let parts = response["candidates"]
        .as_array()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate["content"]["parts"].as_array())
        .ok_or_else(|| {
            let reason = response["promptFeedback"]["blockReason"]
                .as_str()
                .unwrap_or("no candidates");
            ClientError::ParseError(format!("Gemini returned no content ({})", reason))
        })?;

    Ok(
        parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect::<Vec<_>>()
            .join("")
    )
}
