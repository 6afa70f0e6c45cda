use log::{ debug, info };
use serde::{ Deserialize, Serialize };

use crate::errors::{ MentorError, MentorResult };
use crate::models::common::{ Stage, StagePhase };
use crate::models::solution::{ ProblemStatement, StageRecord };

/// Status and committed output of one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSlot {
    pub phase: StagePhase,
    pub record: Option<StageRecord>,
    /// Message of the most recent failed attempt, cleared on the next start
    pub last_error: Option<String>,
}

impl Default for StageSlot {
    fn default() -> Self {
        Self {
            phase: StagePhase::NotStarted,
            record: None,
            last_error: None,
        }
    }
}

/// Per-session record of which stages have completed and what they produced.
///
/// Stages complete strictly in order. A stage's record is only written by
/// [`WorkflowState::record_result`], so a failed attempt never leaves partial
/// output behind. At most one stage runs at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    problem: Option<ProblemStatement>,
    slots: [StageSlot; 3],
    active: Option<Stage>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the problem text. Locked once the Basic stage has started.
    pub fn submit_problem(&mut self, text: &str) -> MentorResult<&ProblemStatement> {
        let problem = ProblemStatement::new(text)?;

        let basic = self.slot(Stage::Basic);
        let locked = basic.record.is_some() || basic.phase.is_running();
        if locked && self.problem.as_ref() != Some(&problem) {
            return Err(
                MentorError::InvalidInput(
                    "a problem is already being solved; clear the workflow to start another".to_string()
                )
            );
        }

        debug!("Problem submitted ({} characters)", problem.as_str().len());
        Ok(self.problem.insert(problem))
    }

    pub fn problem(&self) -> Option<&ProblemStatement> {
        self.problem.as_ref()
    }

    pub fn status(&self, stage: Stage) -> StagePhase {
        self.slot(stage).phase
    }

    pub fn record(&self, stage: Stage) -> Option<&StageRecord> {
        self.slot(stage).record.as_ref()
    }

    pub fn last_error(&self, stage: Stage) -> Option<&str> {
        self.slot(stage).last_error.as_deref()
    }

    pub fn active_stage(&self) -> Option<Stage> {
        self.active
    }

    /// True iff every stage before `stage` is done
    pub fn is_ready(&self, stage: Stage) -> bool {
        stage.predecessors().all(|p| self.status(p) == StagePhase::Done)
    }

    /// The committed record `stage` builds on
    pub fn predecessor_record(&self, stage: Stage) -> MentorResult<Option<&StageRecord>> {
        match stage.predecessor() {
            None => Ok(None),
            Some(predecessor) =>
                match self.record(predecessor) {
                    Some(record) if self.status(predecessor) == StagePhase::Done =>
                        Ok(Some(record)),
                    _ => Err(MentorError::PredecessorNotDone { stage, predecessor }),
                }
        }
    }

    pub fn mark_started(&mut self, stage: Stage) -> MentorResult<()> {
        if let Some(running) = self.active {
            return Err(MentorError::AlreadyRunning { running });
        }
        self.ensure_ready(stage)?;

        let slot = self.slot_mut(stage);
        if !slot.phase.can_advance_to(StagePhase::Generating) {
            return Err(MentorError::InvalidTransition {
                stage,
                from: slot.phase,
                to: StagePhase::Generating,
            });
        }
        slot.phase = StagePhase::Generating;
        slot.last_error = None;
        self.active = Some(stage);

        info!("{} started", stage);
        Ok(())
    }

    /// Move the running stage forward to another in-flight phase
    pub fn advance(&mut self, stage: Stage, next: StagePhase) -> MentorResult<()> {
        let from = self.status(stage);
        if self.active != Some(stage) || !next.is_running() || !from.can_advance_to(next) {
            return Err(MentorError::InvalidTransition { stage, from, to: next });
        }

        debug!("{}: {} -> {}", stage, from, next);
        self.slot_mut(stage).phase = next;
        Ok(())
    }

    /// Commit the running stage's record.
    ///
    /// Recording an identical record on a stage that is already done is a no-op.
    pub fn record_result(&mut self, stage: Stage, record: StageRecord) -> MentorResult<()> {
        if record.stage != stage {
            return Err(
                MentorError::InvalidInput(
                    format!("record for {} cannot be stored as {}", record.stage, stage)
                )
            );
        }
        if let Some(running) = self.active {
            if running != stage {
                return Err(MentorError::AlreadyRunning { running });
            }
        }
        self.ensure_ready(stage)?;

        let slot = self.slot(stage);
        let changed = slot.record.as_ref() != Some(&record);
        // Only a running attempt may commit; a finished stage accepts its own record again.
        let repeat = slot.phase == StagePhase::Done && !changed;
        if self.active != Some(stage) && !repeat {
            return Err(MentorError::InvalidTransition {
                stage,
                from: slot.phase,
                to: StagePhase::Done,
            });
        }

        let slot = self.slot_mut(stage);
        slot.record = Some(record);
        slot.phase = StagePhase::Done;
        slot.last_error = None;
        self.active = None;

        if changed {
            // Later stages were built on the replaced record.
            for later in stage.downstream() {
                if *self.slot(later) != StageSlot::default() {
                    debug!("Invalidating {} after {} changed", later, stage);
                }
                *self.slot_mut(later) = StageSlot::default();
            }
            info!("{} done", stage);
        }
        Ok(())
    }

    /// Abort the running attempt. An earlier committed record survives.
    pub fn mark_failed(&mut self, stage: Stage, message: impl Into<String>) {
        if self.active == Some(stage) {
            self.active = None;
        }

        let slot = self.slot_mut(stage);
        slot.last_error = Some(message.into());
        slot.phase = if slot.record.is_some() { StagePhase::Done } else { StagePhase::Failed };
    }

    /// Clear every stage and the problem
    pub fn reset(&mut self) {
        info!("Workflow reset");
        *self = Self::default();
    }

    pub fn completed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.phase == StagePhase::Done)
            .count()
    }

    /// Share of stages done, in percent
    pub fn progress(&self) -> u8 {
        ((self.completed_count() * 100) / Stage::ALL.len()) as u8
    }

    fn ensure_ready(&self, stage: Stage) -> MentorResult<()> {
        match stage.predecessors().find(|p| self.status(*p) != StagePhase::Done) {
            Some(predecessor) => Err(MentorError::PredecessorNotDone { stage, predecessor }),
            None => Ok(()),
        }
    }

    fn slot(&self, stage: Stage) -> &StageSlot {
        &self.slots[stage.index()]
    }

    fn slot_mut(&mut self, stage: Stage) -> &mut StageSlot {
        &mut self.slots[stage.index()]
    }
}
