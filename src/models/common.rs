use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

/// The three solution stages, in the order they must complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Basic,
    SubOptimal,
    Optimal,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Basic, Stage::SubOptimal, Stage::Optimal];

    /// The stage that must be done before this one may start
    pub fn predecessor(self) -> Option<Stage> {
        match self {
            Stage::Basic => None,
            Stage::SubOptimal => Some(Stage::Basic),
            Stage::Optimal => Some(Stage::SubOptimal),
        }
    }

    pub fn successor(self) -> Option<Stage> {
        match self {
            Stage::Basic => Some(Stage::SubOptimal),
            Stage::SubOptimal => Some(Stage::Optimal),
            Stage::Optimal => None,
        }
    }

    /// All stages that come before this one, nearest last
    pub fn predecessors(self) -> impl Iterator<Item = Stage> {
        Stage::ALL.into_iter().filter(move |s| *s < self)
    }

    /// All stages that come after this one
    pub fn downstream(self) -> impl Iterator<Item = Stage> {
        Stage::ALL.into_iter().filter(move |s| *s > self)
    }

    pub fn index(self) -> usize {
        match self {
            Stage::Basic => 0,
            Stage::SubOptimal => 1,
            Stage::Optimal => 2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Basic => write!(f, "Basic Approach"),
            Stage::SubOptimal => write!(f, "Sub-Optimal"),
            Stage::Optimal => write!(f, "Optimal Solution"),
        }
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "basic" | "brute-force" | "bruteforce" => Ok(Stage::Basic),
            "sub-optimal" | "suboptimal" => Ok(Stage::SubOptimal),
            "optimal" => Ok(Stage::Optimal),
            other => Err(format!("unknown stage: {}", other)),
        }
    }
}

/// Position of a stage in its state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagePhase {
    NotStarted,
    Generating,
    Implementing,
    Testing,
    Verifying,
    Done,
    Failed,
}

impl StagePhase {
    /// Whether the state machine allows moving from `self` to `next`
    pub fn can_advance_to(self, next: StagePhase) -> bool {
        use StagePhase::*;
        match (self, next) {
            (Done, Failed) => false,
            (_, Failed) => true,
            (NotStarted | Done | Failed, Generating) => true,
            (Generating, Implementing | Testing | Done) => true,
            (Implementing, Testing) => true,
            (Testing, Verifying) => true,
            (Verifying, Done) => true,
            _ => false,
        }
    }

    pub fn is_running(self) -> bool {
        matches!(
            self,
            StagePhase::Generating |
                StagePhase::Implementing |
                StagePhase::Testing |
                StagePhase::Verifying
        )
    }
}

impl fmt::Display for StagePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StagePhase::NotStarted => write!(f, "not started"),
            StagePhase::Generating => write!(f, "generating"),
            StagePhase::Implementing => write!(f, "implementing"),
            StagePhase::Testing => write!(f, "testing"),
            StagePhase::Verifying => write!(f, "verifying"),
            StagePhase::Done => write!(f, "done"),
            StagePhase::Failed => write!(f, "failed"),
        }
    }
}

/// Identifies a remote capability registered with the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityId {
    ProblemAnalyzer,
    BruteForceApproach,
    BruteForceCoder,
    SubOptimalApproach,
    SubOptimalCoder,
    OptimalApproach,
    OptimalCoder,
    CodeRunner,
    CodeVerifier,
    NotesExplainer,
    NotesTracer,
    NotesFinalizer,
}

impl CapabilityId {
    pub const ALL: [CapabilityId; 12] = [
        CapabilityId::ProblemAnalyzer,
        CapabilityId::BruteForceApproach,
        CapabilityId::BruteForceCoder,
        CapabilityId::SubOptimalApproach,
        CapabilityId::SubOptimalCoder,
        CapabilityId::OptimalApproach,
        CapabilityId::OptimalCoder,
        CapabilityId::CodeRunner,
        CapabilityId::CodeVerifier,
        CapabilityId::NotesExplainer,
        CapabilityId::NotesTracer,
        CapabilityId::NotesFinalizer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityId::ProblemAnalyzer => "problem_analyzer",
            CapabilityId::BruteForceApproach => "brute_force_approach",
            CapabilityId::BruteForceCoder => "brute_force_coder",
            CapabilityId::SubOptimalApproach => "sub_optimal_approach",
            CapabilityId::SubOptimalCoder => "sub_optimal_coder",
            CapabilityId::OptimalApproach => "optimal_approach",
            CapabilityId::OptimalCoder => "optimal_coder",
            CapabilityId::CodeRunner => "code_runner",
            CapabilityId::CodeVerifier => "code_verifier",
            CapabilityId::NotesExplainer => "notes_explainer",
            CapabilityId::NotesTracer => "notes_tracer",
            CapabilityId::NotesFinalizer => "notes_finalizer",
        }
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hosted model providers the client can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Groq,
    Gemini,
}

impl Provider {
    pub fn env_var(self) -> &'static str {
        match self {
            Provider::Groq => "GROQ_API_KEY",
            Provider::Gemini => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Groq => write!(f, "Groq"),
            Provider::Gemini => write!(f, "Gemini"),
        }
    }
}

/// A concrete model on a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    pub provider: Provider,
    pub model: String,
}

impl ModelRef {
    pub fn new(provider: Provider, model: impl Into<String>) -> Self {
        Self { provider, model: model.into() }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}
