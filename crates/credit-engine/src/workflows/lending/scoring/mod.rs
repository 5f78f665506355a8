mod rules;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Customer, CustomerId, Loan};

/// Score awarded to customers with no loan history.
pub const NO_HISTORY_SCORE: u32 = 100;

/// Factors contributing to a creditworthiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreFactor {
    OnTimeRepayment,
    LoanCount,
    CurrentYearActivity,
    LoanVolume,
}

/// Discrete contribution to a score so decisions can be audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

/// How the final score was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    /// Outstanding principal exceeded the approved limit.
    OverLimit,
    /// No loans on record.
    NoHistory,
    /// Sum of the weighted history components.
    History,
}

/// Creditworthiness score with its component trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditScore {
    pub customer_id: CustomerId,
    pub value: u32,
    pub basis: ScoreBasis,
    pub components: Vec<ScoreComponent>,
}

/// Score a customer's loan history as of `today`.
///
/// Over-limit customers score 0 and an empty history scores 100. Otherwise the
/// four components are summed and rounded; the sum is not clamped, so it can
/// exceed 100.
pub fn score_history(customer: &Customer, loan_history: &[Loan], today: NaiveDate) -> CreditScore {
    let outstanding: f64 = loan_history.iter().map(|loan| loan.loan_amount).sum();
    if outstanding > customer.approved_limit as f64 {
        return CreditScore {
            customer_id: customer.id,
            value: 0,
            basis: ScoreBasis::OverLimit,
            components: Vec::new(),
        };
    }

    if loan_history.is_empty() {
        return CreditScore {
            customer_id: customer.id,
            value: NO_HISTORY_SCORE,
            basis: ScoreBasis::NoHistory,
            components: Vec::new(),
        };
    }

    let components = rules::history_components(loan_history, today);
    let total: f64 = components.iter().map(|component| component.points).sum();

    CreditScore {
        customer_id: customer.id,
        value: total.round_ties_even() as u32,
        basis: ScoreBasis::History,
        components,
    }
}

/// Integer creditworthiness score, see [`score_history`].
pub fn compute_score(customer: &Customer, loan_history: &[Loan], today: NaiveDate) -> u32 {
    score_history(customer, loan_history, today).value
}
