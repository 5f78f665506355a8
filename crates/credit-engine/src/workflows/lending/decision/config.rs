use serde::{Deserialize, Serialize};

/// Score band that approves only at or above a minimum rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    /// Exclusive lower score bound of the tier.
    pub score_above: u32,
    /// Requested rates below this are corrected up to it.
    pub minimum_rate: f64,
}

/// Treatment of applications scoring at or below the lowest tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LowScorePolicy {
    /// Reject outright.
    Reject,
    /// Approve, correcting the rate up to `minimum_rate`.
    FloorRate { minimum_rate: f64 },
}

impl LowScorePolicy {
    pub const DEFAULT_FLOOR_RATE: f64 = 20.0;

    pub fn label(&self) -> &'static str {
        match self {
            LowScorePolicy::Reject => "reject",
            LowScorePolicy::FloorRate { .. } => "floor",
        }
    }
}

/// Thresholds for the tiered approval policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Scores strictly above this are approved at the requested rate.
    pub approve_above: u32,
    pub standard_tier: RateTier,
    pub subprime_tier: RateTier,
    pub low_score: LowScorePolicy,
    /// Share of monthly salary that existing plus new EMIs may not exceed.
    pub max_emi_to_salary: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            approve_above: 50,
            standard_tier: RateTier {
                score_above: 30,
                minimum_rate: 12.0,
            },
            subprime_tier: RateTier {
                score_above: 10,
                minimum_rate: 16.0,
            },
            low_score: LowScorePolicy::Reject,
            max_emi_to_salary: 0.5,
        }
    }
}

impl PolicyConfig {
    pub fn with_low_score(mut self, low_score: LowScorePolicy) -> Self {
        self.low_score = low_score;
        self
    }
}
