use serde::{ Deserialize, Serialize };
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::config::{ MentorOptions, RetryPolicy };
use crate::errors::MentorError;
use crate::implementations::prompts;
use crate::models::common::{ CapabilityId, ModelRef, Provider };

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),
}

impl From<ConfigError> for MentorError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingApiKey(msg) => MentorError::MissingConfiguration(msg),
            other => MentorError::SystemError(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ApiConfig {
    /// API key; falls back to the provider's environment variable
    pub api_key: Option<String>,

    /// Base endpoint for the provider
    pub api_endpoint: Option<String>,

    /// Model to use on this provider
    pub model: Option<String>,
}

/// API keys for every provider the default wiring uses
#[derive(Clone)]
pub struct Credentials {
    pub groq: String,
    pub gemini: String,
}

impl Credentials {
    pub fn key_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::Groq => &self.groq,
            Provider::Gemini => &self.gemini,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("groq", &"***").field("gemini", &"***").finish()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MentorConfig {
    /// Groq (OpenAI-compatible) API used by the reasoning models
    pub groq_api: ApiConfig,

    /// Google Gemini API used by the coordinating and coding models
    pub gemini_api: ApiConfig,

    /// Prompt templates; `capability` wraps every model call
    pub prompt_templates: HashMap<String, String>,

    /// Instruction overrides keyed by capability id
    pub instructions: HashMap<String, String>,

    /// Maximum tokens for API calls
    pub max_tokens: Option<usize>,

    /// Temperature for generation (0.0-1.0)
    pub temperature: Option<f32>,

    /// Total attempts per gateway call, including the first
    pub retry_attempts: Option<u32>,

    /// Base delay of the exponential backoff between attempts
    pub retry_base_delay_ms: Option<u64>,

    /// Pause between dependent calls inside a stage
    pub pacing_delay_secs: Option<u64>,

    /// HTTP timeout per request
    pub request_timeout_secs: Option<u64>,

    /// Run the testing and verifying phases on the brute-force code too
    pub verify_basic_stage: Option<bool>,
}

impl MentorConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: MentorConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    fn api(&self, provider: Provider) -> &ApiConfig {
        match provider {
            Provider::Groq => &self.groq_api,
            Provider::Gemini => &self.gemini_api,
        }
    }

    /// Get the API key for a provider, checking the environment if not in config
    pub fn get_api_key(&self, provider: Provider) -> Result<String, ConfigError> {
        use log::debug;

        if let Some(api_key) = self.api(provider).api_key.as_ref().filter(|k| !k.is_empty()) {
            debug!("Using {} API key from config", provider);
            return Ok(api_key.clone());
        }

        match std::env::var(provider.env_var()) {
            Ok(key) if !key.trim().is_empty() => {
                debug!("Using {} API key from {}", provider, provider.env_var());
                Ok(key)
            }
            _ => Err(ConfigError::MissingApiKey(format!("{} is not set", provider.env_var()))),
        }
    }

    /// Resolve every key up front so a missing credential is reported once, at startup
    pub fn resolve_credentials(&self) -> Result<Credentials, ConfigError> {
        let missing: Vec<&str> = [Provider::Groq, Provider::Gemini]
            .into_iter()
            .filter(|p| self.get_api_key(*p).is_err())
            .map(|p| p.env_var())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingApiKey(format!("{} not set", missing.join(", "))));
        }

        Ok(Credentials {
            groq: self.get_api_key(Provider::Groq)?,
            gemini: self.get_api_key(Provider::Gemini)?,
        })
    }

    pub fn model(&self, provider: Provider) -> ModelRef {
        let default = match provider {
            Provider::Groq => "llama-3.3-70b-versatile",
            Provider::Gemini => "gemini-2.0-flash",
        };
        ModelRef::new(provider, self.api(provider).model.clone().unwrap_or_else(|| default.to_string()))
    }

    pub fn endpoint(&self, provider: Provider) -> String {
        let default = match provider {
            Provider::Groq => "https://api.groq.com/openai/v1/chat/completions",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        };
        self.api(provider).api_endpoint.clone().unwrap_or_else(|| default.to_string())
    }

    /// Get the template for a specific task
    pub fn get_template(&self, template_name: &str) -> Option<String> {
        self.prompt_templates.get(template_name).cloned()
    }

    /// Instruction override for a capability, if configured
    pub fn instructions_for(&self, id: CapabilityId) -> Option<&str> {
        self.instructions.get(id.as_str()).map(String::as_str)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(120))
    }

    pub fn options(&self) -> MentorOptions {
        MentorOptions {
            retry: RetryPolicy {
                max_attempts: self.retry_attempts.unwrap_or(2).max(1),
                base_delay: Duration::from_millis(self.retry_base_delay_ms.unwrap_or(1000)),
                max_delay: Duration::from_secs(30),
            },
            pacing_delay: Duration::from_secs(self.pacing_delay_secs.unwrap_or(10)),
            verify_basic_stage: self.verify_basic_stage.unwrap_or(false),
        }
    }
}

/// Default configuration
impl Default for MentorConfig {
    fn default() -> Self {
        let mut prompt_templates = HashMap::new();
        prompt_templates.insert(
            "capability".to_string(),
            prompts::DEFAULT_CAPABILITY_TEMPLATE.to_string()
        );

        MentorConfig {
            groq_api: ApiConfig::default(),
            gemini_api: ApiConfig::default(),
            prompt_templates,
            instructions: HashMap::new(),
            max_tokens: Some(4096),
            temperature: Some(0.2),
            retry_attempts: Some(2),
            retry_base_delay_ms: Some(1000),
            pacing_delay_secs: Some(10),
            request_timeout_secs: Some(120),
            verify_basic_stage: Some(false),
        }
    }
}
