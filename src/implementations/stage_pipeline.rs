use std::ops::{ Deref, DerefMut };
use std::sync::Arc;

use log::{ debug, error, info, warn };
use serde_json::json;

use crate::config::MentorOptions;
use crate::errors::{ MentorError, MentorResult };
use crate::implementations::gateway::Gateway;
use crate::models::common::{ CapabilityId, Stage, StagePhase };
use crate::models::solution::{
    ApproachProposal,
    BasicSolution,
    CodeDraft,
    StageRecord,
    StageResult,
    VerifiedCode,
    TEST_OUTPUT_SCHEMA,
};
use crate::models::workflow::WorkflowState;
use crate::traits::pacer::Pacer;

/// Everything a stage reads from the workflow before its first call
struct StageInput {
    problem: String,
    prior: Option<StageRecord>,
    test_cases: Vec<String>,
}

impl StageInput {
    fn collect(state: &WorkflowState, stage: Stage) -> MentorResult<Self> {
        if let Some(running) = state.active_stage() {
            return Err(MentorError::AlreadyRunning { running });
        }

        let prior = state.predecessor_record(stage)?.cloned();

        let problem = state
            .problem()
            .map(|p| p.as_str().to_string())
            .ok_or_else(|| MentorError::InvalidInput("submit a problem before running a stage".to_string()))?;

        let test_cases = state
            .record(Stage::Basic)
            .and_then(|r| r.analysis.as_ref())
            .map(|a| a.examples.clone())
            .unwrap_or_default();

        Ok(Self { problem, prior, test_cases })
    }
}

/// Exclusive access to the workflow for one running attempt.
///
/// If the attempt is dropped before it commits or fails (a cancelled future,
/// a timeout), the stage is marked failed so the workflow is not left running.
struct Attempt<'a> {
    state: &'a mut WorkflowState,
    stage: Stage,
}

impl<'a> Attempt<'a> {
    fn start(state: &'a mut WorkflowState, stage: Stage) -> MentorResult<Self> {
        state.mark_started(stage)?;
        Ok(Self { state, stage })
    }
}

impl Deref for Attempt<'_> {
    type Target = WorkflowState;

    fn deref(&self) -> &WorkflowState {
        self.state
    }
}

impl DerefMut for Attempt<'_> {
    fn deref_mut(&mut self) -> &mut WorkflowState {
        self.state
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if self.state.active_stage() == Some(self.stage) {
            warn!("{} attempt abandoned while {}", self.stage, self.state.status(self.stage));
            self.state.mark_failed(self.stage, "attempt interrupted before it finished");
        }
    }
}

/// Approach and coder capabilities behind each improvement stage
fn improvement_capabilities(stage: Stage) -> Option<(CapabilityId, CapabilityId)> {
    match stage {
        Stage::Basic => None,
        Stage::SubOptimal => Some((CapabilityId::SubOptimalApproach, CapabilityId::SubOptimalCoder)),
        Stage::Optimal => Some((CapabilityId::OptimalApproach, CapabilityId::OptimalCoder)),
    }
}

/// Drives one solution stage through its phases.
///
/// The pipeline holds no state of its own; progress and records live in the
/// [`WorkflowState`] passed to each call. Nothing is committed until every
/// phase of the attempt has succeeded.
pub struct StagePipeline {
    gateway: Arc<Gateway>,
    pacer: Arc<dyn Pacer>,
    options: MentorOptions,
}

impl StagePipeline {
    pub fn new(gateway: Arc<Gateway>, pacer: Arc<dyn Pacer>, options: MentorOptions) -> Self {
        Self { gateway, pacer, options }
    }

    /// Run `stage` from scratch and commit its record.
    ///
    /// Fails without calling any capability when the stage is not ready.
    pub async fn run_stage(
        &self,
        state: &mut WorkflowState,
        stage: Stage
    ) -> MentorResult<StageRecord> {
        let input = StageInput::collect(state, stage)?;
        let mut attempt = Attempt::start(state, stage)?;

        match self.execute(&mut attempt, stage, input).await {
            Ok(record) => {
                attempt.record_result(stage, record.clone())?;
                info!(
                    "{} complete (time {}, space {})",
                    stage,
                    record.time_complexity(),
                    record.space_complexity()
                );
                Ok(record)
            }
            Err(err) => {
                let phase = attempt.status(stage);
                let message = err.to_string();
                error!("{} failed while {}: {}", stage, phase, message);
                attempt.mark_failed(stage, message.clone());
                Err(MentorError::StageFailed { stage, phase, message })
            }
        }
    }

    /// Run every stage up to and including `target` that is not already done
    pub async fn run_through(
        &self,
        state: &mut WorkflowState,
        target: Stage
    ) -> MentorResult<Vec<StageRecord>> {
        let mut completed = Vec::new();
        for stage in Stage::ALL.into_iter().filter(|s| *s <= target) {
            if state.status(stage) == StagePhase::Done {
                continue;
            }
            completed.push(self.run_stage(state, stage).await?);
        }
        Ok(completed)
    }

    async fn execute(
        &self,
        state: &mut WorkflowState,
        stage: Stage,
        input: StageInput
    ) -> MentorResult<StageRecord> {
        match improvement_capabilities(stage) {
            None => self.execute_basic(state, input).await,
            Some((approach, coder)) => self.execute_improvement(state, stage, input, approach, coder).await,
        }
    }

    async fn execute_basic(
        &self,
        state: &mut WorkflowState,
        input: StageInput
    ) -> MentorResult<StageRecord> {
        let stage = Stage::Basic;
        debug!("Analyzing problem ({} characters)", input.problem.len());

        let solution: BasicSolution = self.gateway.invoke(
            CapabilityId::ProblemAnalyzer,
            &json!({ "problem": input.problem }),
            &BasicSolution::SCHEMA
        ).await?;
        let (analysis, result) = solution.split();
        info!("{}: {} example test cases found", stage, analysis.examples.len());

        let mut record = StageRecord {
            stage,
            result,
            verified: None,
            analysis: None,
            test_output: None,
            prior_code: None,
        };

        if self.options.verify_basic_stage {
            self.pacer.pause(CapabilityId::ProblemAnalyzer).await;
            let (test_output, verified) = self.test_and_verify(
                state,
                stage,
                &record.result.code,
                &analysis.examples
            ).await?;
            record.test_output = Some(test_output);
            record.verified = Some(verified);
        }

        record.analysis = Some(analysis);
        Ok(record)
    }

    async fn execute_improvement(
        &self,
        state: &mut WorkflowState,
        stage: Stage,
        input: StageInput,
        approach_id: CapabilityId,
        coder_id: CapabilityId
    ) -> MentorResult<StageRecord> {
        let prior = input.prior.ok_or_else(|| MentorError::SystemError(
            format!("{} has no prior record to build on", stage)
        ))?;
        let prior_code = prior.carried_code().to_string();

        let proposal: ApproachProposal = self.gateway.invoke(
            approach_id,
            &json!({
                "problem": input.problem,
                "prior_approach": prior.result.approach,
                "prior_algorithm": prior.result.algorithm,
                "prior_code": prior_code,
                "prior_time_complexity": prior.time_complexity(),
                "prior_space_complexity": prior.space_complexity(),
            }),
            &ApproachProposal::SCHEMA
        ).await?;
        info!("{}: proposed {} time, {} space", stage, proposal.time_complexity, proposal.space_complexity);
        self.pacer.pause(approach_id).await;

        state.advance(stage, StagePhase::Implementing)?;
        let draft: CodeDraft = self.gateway.invoke(
            coder_id,
            &json!({
                "problem": input.problem,
                "approach": proposal.approach,
                "algorithm": proposal.algorithm,
                "prior_code": prior_code,
            }),
            &CodeDraft::SCHEMA
        ).await?;
        debug!("{}: generated {} characters of code", stage, draft.code.len());
        self.pacer.pause(coder_id).await;

        let (test_output, verified) = self.test_and_verify(
            state,
            stage,
            &draft.code,
            &input.test_cases
        ).await?;

        Ok(StageRecord {
            stage,
            result: StageResult {
                approach: proposal.approach,
                algorithm: proposal.algorithm,
                code: draft.code,
                time_complexity: proposal.time_complexity,
                space_complexity: proposal.space_complexity,
            },
            verified: Some(verified),
            analysis: None,
            test_output: Some(test_output),
            prior_code: Some(prior_code),
        })
    }

    /// Testing then Verifying; leaves the stage in `Verifying` on success
    async fn test_and_verify(
        &self,
        state: &mut WorkflowState,
        stage: Stage,
        code: &str,
        test_cases: &[String]
    ) -> MentorResult<(String, VerifiedCode)> {
        state.advance(stage, StagePhase::Testing)?;
        let test_output: String = self.gateway.invoke(
            CapabilityId::CodeRunner,
            &json!({ "code": code, "test_cases": test_cases }),
            &TEST_OUTPUT_SCHEMA
        ).await?;
        debug!("{}: test output {} characters", stage, test_output.len());
        self.pacer.pause(CapabilityId::CodeRunner).await;

        state.advance(stage, StagePhase::Verifying)?;
        let verified: VerifiedCode = self.gateway.invoke(
            CapabilityId::CodeVerifier,
            &json!({
                "code": code,
                "test_output": test_output,
                "test_cases": test_cases,
            }),
            &VerifiedCode::SCHEMA
        ).await?;

        Ok((test_output, verified))
    }
}
