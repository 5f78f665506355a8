use serde::{Deserialize, Serialize};

use super::config::{LowScorePolicy, PolicyConfig, RateTier};

/// Outcome of the tiered policy for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Approved { interest_rate: f64, corrected: bool },
    Rejected(RejectionReason),
}

impl Verdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            Verdict::Approved {
                corrected: false, ..
            } => "Loan approved".to_string(),
            Verdict::Approved {
                interest_rate,
                corrected: true,
            } => format!("Loan approved with corrected interest rate: {interest_rate}%"),
            Verdict::Rejected(reason) => reason.summary(),
        }
    }
}

/// Why an application was turned down. These are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    Unaffordable {
        total_emi: f64,
        salary_share: f64,
        max_emi_to_salary: f64,
    },
    LowCreditScore(u32),
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::Unaffordable {
                max_emi_to_salary, ..
            } => format!(
                "Loan not approved: EMI exceeds {}% of monthly salary",
                (max_emi_to_salary * 10_000.0).round() / 100.0
            ),
            RejectionReason::LowCreditScore(score) => {
                format!("Loan not approved: Credit score too low ({score})")
            }
        }
    }
}

pub(crate) fn affordability_check(
    existing_emis: f64,
    new_emi: f64,
    monthly_salary: u64,
    config: &PolicyConfig,
) -> Option<RejectionReason> {
    let total_emi = existing_emis + new_emi;
    let salary_share = config.max_emi_to_salary * monthly_salary as f64;
    if total_emi > salary_share {
        return Some(RejectionReason::Unaffordable {
            total_emi,
            salary_share,
            max_emi_to_salary: config.max_emi_to_salary,
        });
    }
    None
}

pub(crate) fn decide_tier(score: u32, requested_rate: f64, config: &PolicyConfig) -> Verdict {
    if score > config.approve_above {
        return Verdict::Approved {
            interest_rate: requested_rate,
            corrected: false,
        };
    }

    for tier in [&config.standard_tier, &config.subprime_tier] {
        if score > tier.score_above {
            return approve_with_floor(requested_rate, tier);
        }
    }

    match config.low_score {
        LowScorePolicy::Reject => Verdict::Rejected(RejectionReason::LowCreditScore(score)),
        LowScorePolicy::FloorRate { minimum_rate } => approve_with_floor(
            requested_rate,
            &RateTier {
                score_above: 0,
                minimum_rate,
            },
        ),
    }
}

fn approve_with_floor(requested_rate: f64, tier: &RateTier) -> Verdict {
    if requested_rate >= tier.minimum_rate {
        Verdict::Approved {
            interest_rate: requested_rate,
            corrected: false,
        }
    } else {
        Verdict::Approved {
            interest_rate: tier.minimum_rate,
            corrected: true,
        }
    }
}
