#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{ json, Value };
    use tokio::test;

    use crate::config::RetryPolicy;
    use crate::errors::MentorError;
    use crate::implementations::notes_pipeline::NotesPipeline;
    use crate::models::common::CapabilityId;
    use crate::models::session::Session;
    use crate::tests::mocks::{ gateway_with, RecordingPacer, ScriptedCapability };

    const CODE: &str = "def two_sum(nums, target):\n    seen = {}\n    for i, v in enumerate(nums):\n        if target - v in seen:\n            return [seen[target - v], i]\n        seen[v] = i";

    fn explanation() -> Value {
        json!({
            "problem_statement": "Find two numbers adding up to target.",
            "approach_summary": "One pass with a hash map of seen values.",
            "detailed_approach": "1. Walk the array\n2. Look up the complement",
            "time_complexity": "O(n)",
            "space_complexity": "O(n)",
            "code_walkthrough": "`seen` maps value to index.",
            "edge_cases": "Duplicates such as [3,3].",
            "key_concepts": "Hashing, complements."
        })
    }

    fn trace() -> Value {
        json!({
            "example_input": "nums = [2,7,11,15], target = 9",
            "step_by_step_trace": "i=0: seen={2:0}\ni=1: 9-7=2 in seen",
            "visual_representation": "[2] [7] [11] [15]\n ^   ^",
            "final_result": "[0, 1]"
        })
    }

    struct Harness {
        explainer: Arc<ScriptedCapability>,
        tracer: Arc<ScriptedCapability>,
        finalizer: Arc<ScriptedCapability>,
        pacer: Arc<RecordingPacer>,
        pipeline: NotesPipeline,
    }

    fn harness() -> Harness {
        let explainer = ScriptedCapability::new(CapabilityId::NotesExplainer, vec![]);
        let tracer = ScriptedCapability::new(CapabilityId::NotesTracer, vec![]);
        let finalizer = ScriptedCapability::new(CapabilityId::NotesFinalizer, vec![]);
        let pacer = Arc::new(RecordingPacer::default());
        let gateway = gateway_with(
            &[explainer.clone(), tracer.clone(), finalizer.clone()],
            RetryPolicy::immediate(2)
        );
        let pipeline = NotesPipeline::new(Arc::new(gateway), pacer.clone());
        Harness { explainer, tracer, finalizer, pacer, pipeline }
    }

    fn script_success(h: &Harness, rendered: &str) {
        h.explainer.push(Ok(explanation()));
        h.tracer.push(Ok(trace()));
        h.finalizer.push(Ok(Value::String(rendered.to_string())));
    }

    #[test]
    async fn test_generate_stores_finalized_notes() {
        let h = harness();
        script_success(&h, "# Two Sum Notes\n\nFinal.");
        let mut session = Session::new();

        let notes = h.pipeline.generate(&mut session, CODE).await.unwrap();

        assert_eq!(notes.rendered, "# Two Sum Notes\n\nFinal.");
        assert_eq!(notes.document.complexity_analysis, "Time: O(n)\nSpace: O(n)");
        assert!(notes.document.example_trace.starts_with("Input: nums = [2,7,11,15], target = 9"));
        assert_eq!(notes.document.final_result, "[0, 1]");
        assert_eq!(session.notes(), Some(&notes));

        let file_name = notes.file_name();
        assert!(file_name.starts_with("dsa_notes_"));
        assert!(file_name.ends_with(".md"));

        // Both analyses see the same code; the finalizer sees the combined draft.
        assert_eq!(h.explainer.payloads()[0]["code"], json!(CODE));
        assert_eq!(h.tracer.payloads()[0]["code"], json!(CODE));
        let draft = h.finalizer.payloads()[0].as_str().unwrap().to_string();
        assert!(draft.contains("## Complexity"));
        assert!(draft.contains("Hashing, complements."));

        assert_eq!(h.pacer.pauses(), vec![CapabilityId::NotesExplainer, CapabilityId::NotesTracer]);
    }

    #[test]
    async fn test_code_indentation_is_sent_as_given() {
        let h = harness();
        script_success(&h, "# Notes");
        let mut session = Session::new();
        let method = "    def helper(self):\n        return 1\n";

        h.pipeline.generate(&mut session, method).await.unwrap();

        assert_eq!(h.explainer.payloads()[0]["code"], json!(method));
        assert_eq!(h.tracer.payloads()[0]["code"], json!(method));
    }

    #[test]
    async fn test_blank_code_is_rejected_before_any_call() {
        let h = harness();
        script_success(&h, "unused");
        let mut session = Session::new();

        let err = h.pipeline.generate(&mut session, "  \n\t").await.unwrap_err();

        assert!(matches!(err, MentorError::InvalidInput(_)));
        assert_eq!(h.explainer.calls(), 0);
        assert!(session.notes().is_none());
    }

    #[test]
    async fn test_trace_failure_keeps_previous_notes() {
        let h = harness();
        script_success(&h, "# First notes");
        let mut session = Session::new();
        let first = h.pipeline.generate(&mut session, CODE).await.unwrap();

        h.explainer.push(Ok(explanation()));
        h.tracer.push(Ok(json!({ "example_input": "nums = [3,3]", "final_result": "[0, 1]" })));

        let err = h.pipeline.generate(&mut session, "print('other code')").await.unwrap_err();

        assert!(matches!(err, MentorError::NotesFailed(_)));
        assert_eq!(session.notes(), Some(&first));
        assert_eq!(h.finalizer.calls(), 1);
    }

    #[test]
    async fn test_explanation_failure_stores_nothing() {
        let h = harness();
        h.explainer.push(Err(MentorError::invalid_response("notes_explainer", "reply is not JSON")));
        let mut session = Session::new();

        let err = h.pipeline.generate(&mut session, CODE).await.unwrap_err();

        match err {
            MentorError::NotesFailed(message) => assert!(message.contains("notes_explainer")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(session.notes().is_none());
        assert_eq!(h.tracer.calls(), 0);
        assert_eq!(h.finalizer.calls(), 0);
    }

    #[test]
    async fn test_finalizer_failure_stores_nothing() {
        let h = harness();
        h.explainer.push(Ok(explanation()));
        h.tracer.push(Ok(trace()));
        h.finalizer.push(Ok(Value::String("   ".to_string())));
        let mut session = Session::new();

        let err = h.pipeline.generate(&mut session, CODE).await.unwrap_err();

        assert!(matches!(err, MentorError::NotesFailed(_)));
        assert!(session.notes().is_none());
    }
}
