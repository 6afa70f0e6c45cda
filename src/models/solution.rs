use serde::{ Deserialize, Serialize };

use crate::errors::{ MentorError, MentorResult };
use crate::models::common::Stage;
use crate::models::schema::ResponseSchema;

/// The problem text as submitted by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemStatement(String);

impl ProblemStatement {
    pub fn new(text: impl Into<String>) -> MentorResult<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(MentorError::InvalidInput("problem statement is empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Structured breakdown of the problem produced by the Basic stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemAnalysis {
    pub problem_statement: String,
    #[serde(default)]
    pub constraints: String,
    /// Example test cases, reused by every later testing phase
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Approach, algorithm, code and complexity claims for one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    pub approach: String,
    pub algorithm: String,
    pub code: String,
    pub time_complexity: String,
    pub space_complexity: String,
}

/// Code after it has been run against the examples and reconciled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedCode {
    pub final_code: String,
    pub time_complexity: String,
    pub space_complexity: String,
    #[serde(default)]
    pub libraries: String,
}

impl VerifiedCode {
    pub const SCHEMA: ResponseSchema = ResponseSchema::json("verified_code", &[
        "final_code",
        "time_complexity",
        "space_complexity",
    ]);
}

/// Everything a stage commits when it completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub result: StageResult,
    pub verified: Option<VerifiedCode>,
    /// Present on the Basic stage only
    pub analysis: Option<ProblemAnalysis>,
    /// Raw output of the testing phase
    pub test_output: Option<String>,
    /// Code of the stage this one improved on
    pub prior_code: Option<String>,
}

impl StageRecord {
    /// The code handed to the next stage: verified if available, generated otherwise
    pub fn carried_code(&self) -> &str {
        match &self.verified {
            Some(verified) => &verified.final_code,
            None => &self.result.code,
        }
    }

    pub fn time_complexity(&self) -> &str {
        match &self.verified {
            Some(verified) => &verified.time_complexity,
            None => &self.result.time_complexity,
        }
    }

    pub fn space_complexity(&self) -> &str {
        match &self.verified {
            Some(verified) => &verified.space_complexity,
            None => &self.result.space_complexity,
        }
    }
}

/// Reply of the problem analyzer: analysis plus a brute-force solution
#[derive(Debug, Clone, Deserialize)]
pub struct BasicSolution {
    pub problem_statement: String,
    #[serde(default)]
    pub constraints: String,
    #[serde(default)]
    pub examples: Vec<String>,
    pub approach: String,
    pub algorithm: String,
    pub code: String,
    pub time_complexity: String,
    pub space_complexity: String,
}

impl BasicSolution {
    pub const SCHEMA: ResponseSchema = ResponseSchema::json("basic_solution", &[
        "problem_statement",
        "constraints",
        "examples",
        "approach",
        "algorithm",
        "code",
        "time_complexity",
        "space_complexity",
    ]);

    pub fn split(self) -> (ProblemAnalysis, StageResult) {
        (
            ProblemAnalysis {
                problem_statement: self.problem_statement,
                constraints: self.constraints,
                examples: self.examples,
            },
            StageResult {
                approach: self.approach,
                algorithm: self.algorithm,
                code: self.code,
                time_complexity: self.time_complexity,
                space_complexity: self.space_complexity,
            },
        )
    }
}

/// Reply of an approach capability: an improved plan without code
#[derive(Debug, Clone, Deserialize)]
pub struct ApproachProposal {
    pub approach: String,
    pub algorithm: String,
    pub time_complexity: String,
    pub space_complexity: String,
}

impl ApproachProposal {
    pub const SCHEMA: ResponseSchema = ResponseSchema::json("approach_proposal", &[
        "approach",
        "algorithm",
        "time_complexity",
        "space_complexity",
    ]);
}

/// Reply of a coder capability
#[derive(Debug, Clone, Deserialize)]
pub struct CodeDraft {
    pub code: String,
}

impl CodeDraft {
    pub const SCHEMA: ResponseSchema = ResponseSchema::json("code_draft", &["code"]);
}

/// Raw execution output of the code runner
pub const TEST_OUTPUT_SCHEMA: ResponseSchema = ResponseSchema::text("test_output");
