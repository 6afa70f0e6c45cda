#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::errors::MentorError;
    use crate::implementations::config::{ ConfigError, Credentials, MentorConfig };
    use crate::implementations::model_client::{
        extract_gemini_content,
        extract_openai_content,
        ClientError,
        LLMClient,
    };
    use crate::models::common::CapabilityId;

    #[test]
    fn test_extract_openai_content() {
        let response =
            json!({
            "choices": [{ "message": { "role": "assistant", "content": "{\"code\": \"x\"}" } }]
        });
        assert_eq!(extract_openai_content(&response).unwrap(), "{\"code\": \"x\"}");

        let error = json!({ "error": { "message": "model not found" } });
        assert!(matches!(extract_openai_content(&error), Err(ClientError::ApiError(m)) if m == "model not found"));

        assert!(matches!(extract_openai_content(&json!({ "choices": [] })), Err(ClientError::ParseError(_))));
    }

    #[test]
    fn test_extract_gemini_content_joins_parts() {
        let response =
            json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] } }]
        });
        assert_eq!(extract_gemini_content(&response).unwrap(), "Hello, world");

        let blocked = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        match extract_gemini_content(&blocked) {
            Err(ClientError::ParseError(message)) => assert!(message.contains("SAFETY")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_transient_classification() {
        let rate_limited = ClientError::HttpError { status: 429, message: String::new() };
        let unavailable = ClientError::HttpError { status: 503, message: String::new() };
        let unauthorized = ClientError::HttpError { status: 401, message: String::new() };
        let timeout = ClientError::NetworkError { message: "timed out".to_string(), transient: true };

        assert!(rate_limited.is_transient());
        assert!(unavailable.is_transient());
        assert!(timeout.is_transient());
        assert!(!unauthorized.is_transient());
        assert!(!ClientError::EmptyResponse.is_transient());
    }

    #[test]
    fn test_into_mentor_error() {
        let id = CapabilityId::CodeRunner;

        let err = ClientError::HttpError { status: 500, message: "boom".to_string() };
        assert!(matches!(err.into_mentor_error(id), MentorError::Transient { capability, .. } if capability == "code_runner"));

        let err = ClientError::EmptyResponse.into_mentor_error(id);
        assert!(matches!(err, MentorError::InvalidResponse { .. }));

        let err = ClientError::from(ConfigError::MissingApiKey("GROQ_API_KEY is not set".to_string()));
        assert!(matches!(err.into_mentor_error(id), MentorError::MissingConfiguration(_)));
    }

    #[test]
    fn test_client_builds_from_default_config() {
        let credentials = Credentials { groq: "g".to_string(), gemini: "k".to_string() };
        assert!(LLMClient::new(&MentorConfig::default(), credentials).is_ok());
    }
}
