use chrono::{Datelike, NaiveDate};

use super::super::domain::Loan;
use super::{ScoreComponent, ScoreFactor};

const LOAN_COUNT_POINTS: f64 = 4.0;
const LOAN_COUNT_CAP: f64 = 100.0;
const CURRENT_YEAR_POINTS: f64 = 10.0;
const CURRENT_YEAR_CAP: f64 = 20.0;
const VOLUME_UNIT: f64 = 100_000.0;
const VOLUME_CAP: f64 = 20.0;

pub(crate) fn history_components(loans: &[Loan], today: NaiveDate) -> Vec<ScoreComponent> {
    let mut components = Vec::with_capacity(4);

    let paid_on_time: u64 = loans.iter().map(|loan| loan.emis_paid_on_time as u64).sum();
    let expected: u64 = loans.iter().map(|loan| loan.tenure as u64).sum();
    let on_time_points = if expected > 0 {
        paid_on_time as f64 / expected as f64 * 100.0
    } else {
        0.0
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::OnTimeRepayment,
        points: on_time_points,
        notes: format!("{paid_on_time} of {expected} EMIs paid on time"),
    });

    let loan_count = loans.len();
    components.push(ScoreComponent {
        factor: ScoreFactor::LoanCount,
        points: (loan_count as f64 * LOAN_COUNT_POINTS).min(LOAN_COUNT_CAP),
        notes: format!("{loan_count} loan(s) on record"),
    });

    let current_year = today.year();
    let current_year_loans = loans
        .iter()
        .filter(|loan| loan.approval_date.year() == current_year)
        .count();
    components.push(ScoreComponent {
        factor: ScoreFactor::CurrentYearActivity,
        points: (current_year_loans as f64 * CURRENT_YEAR_POINTS).min(CURRENT_YEAR_CAP),
        notes: format!("{current_year_loans} loan(s) approved in {current_year}"),
    });

    let volume: f64 = loans.iter().map(|loan| loan.loan_amount).sum();
    components.push(ScoreComponent {
        factor: ScoreFactor::LoanVolume,
        points: (volume / VOLUME_UNIT).min(VOLUME_CAP),
        notes: format!("total volume {volume:.2}"),
    });

    components
}
