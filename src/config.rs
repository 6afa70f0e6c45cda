use std::time::Duration;

/// Retry budget and backoff for gateway calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retrying after the given zero-based attempt
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let multiplier = 2u32.saturating_pow(attempt.min(16));
        self.base_delay.saturating_mul(multiplier).min(self.max_delay)
    }

    /// No waiting between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Runtime options for the pipelines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorOptions {
    pub retry: RetryPolicy,
    /// Pause inserted between dependent calls within a stage
    pub pacing_delay: Duration,
    /// Give the Basic stage the same testing and verifying phases as later stages
    pub verify_basic_stage: bool,
}

impl Default for MentorOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            pacing_delay: Duration::from_secs(10),
            verify_basic_stage: false,
        }
    }
}
