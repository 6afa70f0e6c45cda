#[cfg(test)]
mod tests {
    use crate::errors::MentorError;
    use crate::models::common::{ Stage, StagePhase };
    use crate::models::workflow::WorkflowState;
    use crate::tests::mocks::{ record, two_sum_problem };

    fn complete(state: &mut WorkflowState, stage: Stage, code: &str) {
        state.mark_started(stage).unwrap();
        state.record_result(stage, record(stage, code)).unwrap();
    }

    fn with_basic_done() -> WorkflowState {
        let mut state = WorkflowState::new();
        state.submit_problem(two_sum_problem()).unwrap();
        complete(&mut state, Stage::Basic, "brute");
        state
    }

    #[test]
    fn test_fresh_state_only_basic_is_ready() {
        let state = WorkflowState::new();
        assert!(state.is_ready(Stage::Basic));
        assert!(!state.is_ready(Stage::SubOptimal));
        assert!(!state.is_ready(Stage::Optimal));
        assert_eq!(state.progress(), 0);
        assert!(state.active_stage().is_none());
    }

    #[test]
    fn test_submit_problem_rejects_blank_text() {
        let mut state = WorkflowState::new();
        let err = state.submit_problem("   \n").unwrap_err();
        assert!(matches!(err, MentorError::InvalidInput(_)));
        assert!(state.problem().is_none());
    }

    #[test]
    fn test_submit_problem_locked_after_basic_completes() {
        let mut state = with_basic_done();
        assert!(state.submit_problem("Reverse a linked list.").is_err());
        // Re-submitting the same text is harmless.
        assert!(state.submit_problem(two_sum_problem()).is_ok());
    }

    #[test]
    fn test_start_without_predecessor_fails() {
        let mut state = WorkflowState::new();
        let err = state.mark_started(Stage::SubOptimal).unwrap_err();
        assert_eq!(err, MentorError::PredecessorNotDone {
            stage: Stage::SubOptimal,
            predecessor: Stage::Basic,
        });
        assert_eq!(state.status(Stage::SubOptimal), StagePhase::NotStarted);
    }

    #[test]
    fn test_only_one_stage_runs_at_a_time() {
        let mut state = with_basic_done();
        state.mark_started(Stage::SubOptimal).unwrap();

        let err = state.mark_started(Stage::Basic).unwrap_err();
        assert_eq!(err, MentorError::AlreadyRunning { running: Stage::SubOptimal });
    }

    #[test]
    fn test_record_result_unlocks_next_stage() {
        let state = with_basic_done();
        assert_eq!(state.status(Stage::Basic), StagePhase::Done);
        assert!(state.is_ready(Stage::SubOptimal));
        assert!(!state.is_ready(Stage::Optimal));
        assert_eq!(state.progress(), 33);
        assert!(state.active_stage().is_none());
    }

    #[test]
    fn test_record_result_is_idempotent() {
        let mut state = with_basic_done();
        complete(&mut state, Stage::SubOptimal, "sorted");
        let before = state.clone();

        state.record_result(Stage::Basic, record(Stage::Basic, "brute")).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_record_result_rejects_mismatched_stage() {
        let mut state = WorkflowState::new();
        let err = state.record_result(Stage::Basic, record(Stage::Optimal, "x")).unwrap_err();
        assert!(matches!(err, MentorError::InvalidInput(_)));
    }

    #[test]
    fn test_record_result_rejects_unfinished_predecessor() {
        let mut state = WorkflowState::new();
        let err = state.record_result(Stage::Optimal, record(Stage::Optimal, "x")).unwrap_err();
        assert!(matches!(err, MentorError::PredecessorNotDone { stage: Stage::Optimal, .. }));
    }

    #[test]
    fn test_record_result_requires_a_started_stage() {
        let mut state = WorkflowState::new();
        let err = state.record_result(Stage::Basic, record(Stage::Basic, "x")).unwrap_err();
        assert_eq!(err, MentorError::InvalidTransition {
            stage: Stage::Basic,
            from: StagePhase::NotStarted,
            to: StagePhase::Done,
        });
        assert_eq!(state.status(Stage::Basic), StagePhase::NotStarted);
        assert!(state.record(Stage::Basic).is_none());
    }

    #[test]
    fn test_record_result_cannot_swap_a_finished_record() {
        let mut state = with_basic_done();
        let err = state.record_result(Stage::Basic, record(Stage::Basic, "brute v2")).unwrap_err();
        assert!(matches!(err, MentorError::InvalidTransition { stage: Stage::Basic, .. }));
        assert_eq!(state.record(Stage::Basic).unwrap().result.code, "brute");
    }

    #[test]
    fn test_changed_record_resets_downstream() {
        let mut state = with_basic_done();
        complete(&mut state, Stage::SubOptimal, "sorted");
        complete(&mut state, Stage::Optimal, "hash map");
        assert_eq!(state.progress(), 100);

        state.mark_started(Stage::Basic).unwrap();
        state.record_result(Stage::Basic, record(Stage::Basic, "brute v2")).unwrap();

        assert_eq!(state.status(Stage::SubOptimal), StagePhase::NotStarted);
        assert_eq!(state.status(Stage::Optimal), StagePhase::NotStarted);
        assert!(state.record(Stage::SubOptimal).is_none());
        assert_eq!(state.record(Stage::Basic).unwrap().result.code, "brute v2");
    }

    #[test]
    fn test_failure_partway_keeps_successor_locked() {
        let mut state = with_basic_done();
        state.mark_started(Stage::SubOptimal).unwrap();
        state.advance(Stage::SubOptimal, StagePhase::Implementing).unwrap();
        state.mark_failed(Stage::SubOptimal, "coder timed out");

        assert_eq!(state.status(Stage::SubOptimal), StagePhase::Failed);
        assert!(state.record(Stage::SubOptimal).is_none());
        assert_eq!(state.last_error(Stage::SubOptimal), Some("coder timed out"));
        assert!(state.is_ready(Stage::SubOptimal));
        assert!(!state.is_ready(Stage::Optimal));
        assert!(state.active_stage().is_none());
    }

    #[test]
    fn test_failed_rerun_keeps_previous_record() {
        let mut state = with_basic_done();
        state.mark_started(Stage::Basic).unwrap();
        state.mark_failed(Stage::Basic, "rate limited");

        assert_eq!(state.status(Stage::Basic), StagePhase::Done);
        assert_eq!(state.record(Stage::Basic).unwrap().result.code, "brute");
        assert!(state.is_ready(Stage::SubOptimal));
    }

    #[test]
    fn test_advance_only_moves_forward() {
        let mut state = with_basic_done();
        state.mark_started(Stage::SubOptimal).unwrap();
        state.advance(Stage::SubOptimal, StagePhase::Implementing).unwrap();
        state.advance(Stage::SubOptimal, StagePhase::Testing).unwrap();

        let err = state.advance(Stage::SubOptimal, StagePhase::Implementing).unwrap_err();
        assert!(matches!(err, MentorError::InvalidTransition { .. }));

        // A stage that is not running cannot be advanced.
        assert!(state.advance(Stage::Optimal, StagePhase::Implementing).is_err());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = with_basic_done();
        complete(&mut state, Stage::SubOptimal, "sorted");

        state.reset();

        assert!(state.problem().is_none());
        assert!(state.is_ready(Stage::Basic));
        assert!(!state.is_ready(Stage::SubOptimal));
        assert!(!state.is_ready(Stage::Optimal));
        for stage in Stage::ALL {
            assert_eq!(state.status(stage), StagePhase::NotStarted);
            assert!(state.record(stage).is_none());
        }
    }
}
