#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use serde_json::{ json, Value };

    use crate::errors::MentorError;
    use crate::implementations::capabilities::{
        parse_json_reply,
        render_template,
        strip_code_fences,
        CollaborativeCapability,
        SingleModelCapability,
    };
    use crate::implementations::model_client::ClientError;
    use crate::models::common::{ CapabilityId, ModelRef, Provider };
    use crate::models::notes::FINALIZED_NOTES_SCHEMA;
    use crate::models::solution::CodeDraft;
    use crate::tests::mocks::{ ScriptedBackend, ScriptedCapability };
    use crate::traits::invocable::Invocable;

    fn gemini() -> ModelRef {
        ModelRef::new(Provider::Gemini, "gemini-2.0-flash")
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\nplain\n```\n"), "plain");
    }

    #[test]
    fn test_parse_json_reply_tolerates_surrounding_prose() {
        let value = parse_json_reply("Here you go:\n{\"code\": \"x = 1\"}\nHope it helps.").unwrap();
        assert_eq!(value, json!({ "code": "x = 1" }));

        assert!(parse_json_reply("no json here").is_err());
        assert!(parse_json_reply("```json\n```").is_err());
    }

    #[test]
    fn test_render_template_fills_placeholders() {
        let mut params = HashMap::new();
        params.insert("instructions", "Do the thing.".to_string());
        params.insert("input", "42".to_string());

        let rendered = render_template("{{instructions}}\nInput: {{input}}\n", &params);
        assert_eq!(rendered, "Do the thing.\nInput: 42");
    }

    #[test]
    fn test_render_template_leaves_inserted_text_alone() {
        let mut params = HashMap::new();
        params.insert("instructions", "Explain.".to_string());
        params.insert("schema", "SCHEMA".to_string());
        params.insert("input", "tpl = '{{schema}} and {{instructions}}'".to_string());

        let rendered = render_template("{{instructions}} {{schema}} {{input}} {{unknown}}", &params);
        assert_eq!(rendered, "Explain. SCHEMA tpl = '{{schema}} and {{instructions}}' {{unknown}}");
        assert_eq!(render_template("open {{input", &params), "open {{input");
    }

    #[test]
    fn test_payload_with_placeholder_text_reaches_prompt_intact() {
        let code = "tpl = '{{schema}} and {{instructions}}'";
        let explainer = SingleModelCapability::new(
            CapabilityId::NotesExplainer,
            gemini(),
            CodeDraft::SCHEMA,
            ScriptedBackend::new(vec![])
        );

        for _ in 0..50 {
            let prompt = explainer.render_prompt(&Value::String(code.to_string()));
            assert!(prompt.contains(code));
        }
    }

    #[tokio::test]
    async fn test_single_model_json_mode() {
        let backend = ScriptedBackend::new(vec![Ok("```json\n{\"code\": \"return []\"}\n```".to_string())]);
        let coder = SingleModelCapability::new(
            CapabilityId::OptimalCoder,
            gemini(),
            CodeDraft::SCHEMA,
            backend.clone()
        ).with_instructions("Write the code.");

        let reply = coder.invoke(&json!({ "approach": "hash map" })).await.unwrap();
        assert_eq!(reply, json!({ "code": "return []" }));

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].json_mode);
        assert_eq!(requests[0].model, gemini());
        assert!(requests[0].prompt.starts_with("Write the code."));
        assert!(requests[0].prompt.contains("hash map"));
        assert!(requests[0].prompt.contains("code_draft"));
    }

    #[tokio::test]
    async fn test_single_model_text_mode_returns_string() {
        let backend = ScriptedBackend::new(vec![Ok("# Notes\n\nAll good.".to_string())]);
        let finalizer = SingleModelCapability::new(
            CapabilityId::NotesFinalizer,
            gemini(),
            FINALIZED_NOTES_SCHEMA,
            backend.clone()
        );

        let reply = finalizer.invoke(&Value::String("## Problem".to_string())).await.unwrap();
        assert_eq!(reply, Value::String("# Notes\n\nAll good.".to_string()));
        assert!(!backend.requests()[0].json_mode);
    }

    #[tokio::test]
    async fn test_transport_errors_are_classified() {
        let backend = ScriptedBackend::new(
            vec![
                Err(ClientError::HttpError { status: 429, message: "slow down".to_string() }),
                Err(ClientError::HttpError { status: 400, message: "bad request".to_string() }),
                Ok("not json at all".to_string())
            ]
        );
        let coder = SingleModelCapability::new(
            CapabilityId::SubOptimalCoder,
            gemini(),
            CodeDraft::SCHEMA,
            backend
        );

        let first = coder.invoke(&json!({})).await.unwrap_err();
        assert!(matches!(first, MentorError::Transient { .. }));

        let second = coder.invoke(&json!({})).await.unwrap_err();
        assert!(matches!(second, MentorError::InvalidResponse { .. }));

        let third = coder.invoke(&json!({})).await.unwrap_err();
        assert!(matches!(third, MentorError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_collaboration_consults_members_in_order() {
        let approach = ScriptedCapability::new(
            CapabilityId::BruteForceApproach,
            vec![Ok(json!({ "approach": "check all pairs" }))]
        );
        let coder = ScriptedCapability::new(
            CapabilityId::BruteForceCoder,
            vec![Ok(json!({ "code": "for i ..." }))]
        );
        let coordinator = ScriptedCapability::new(
            CapabilityId::ProblemAnalyzer,
            vec![Ok(json!({ "combined": true }))]
        );

        let team = CollaborativeCapability::new(
            CapabilityId::ProblemAnalyzer,
            vec![approach.clone() as Arc<dyn Invocable>, coder.clone() as Arc<dyn Invocable>],
            coordinator.clone()
        );

        let input = json!({ "problem": "Two Sum" });
        let reply = team.invoke(&input).await.unwrap();
        assert_eq!(reply, json!({ "combined": true }));
        assert_eq!(team.id(), CapabilityId::ProblemAnalyzer);

        assert_eq!(approach.payloads(), vec![input.clone()]);
        assert_eq!(coder.payloads(), vec![input.clone()]);

        let handed = &coordinator.payloads()[0];
        assert_eq!(handed["input"], input);
        assert_eq!(handed["contributions"][0]["member"], "brute_force_approach");
        assert_eq!(handed["contributions"][1]["member"], "brute_force_coder");
        assert_eq!(handed["contributions"][1]["output"]["code"], "for i ...");
    }

    #[tokio::test]
    async fn test_collaboration_fails_when_a_member_fails() {
        let approach = ScriptedCapability::new(
            CapabilityId::BruteForceApproach,
            vec![Err(MentorError::transient("brute_force_approach", "timeout"))]
        );
        let coder = ScriptedCapability::new(CapabilityId::BruteForceCoder, vec![]);
        let coordinator = ScriptedCapability::new(CapabilityId::ProblemAnalyzer, vec![]);

        let team = CollaborativeCapability::new(
            CapabilityId::ProblemAnalyzer,
            vec![approach as Arc<dyn Invocable>, coder.clone() as Arc<dyn Invocable>],
            coordinator.clone()
        );

        let err = team.invoke(&json!({})).await.unwrap_err();
        assert!(matches!(err, MentorError::Transient { .. }));
        assert_eq!(coder.calls(), 0);
        assert_eq!(coordinator.calls(), 0);
    }
}
