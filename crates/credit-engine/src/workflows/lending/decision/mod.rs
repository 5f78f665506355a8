mod config;
mod policy;

pub use config::{LowScorePolicy, PolicyConfig, RateTier};
pub use policy::{RejectionReason, Verdict};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{end_date_for, Customer, CustomerId, Loan, LoanId, NewLoan};
use super::error::LendingError;
use super::installment::calculate_emi;
use super::intake::LoanApplication;
use super::repository::RepositoryError;
use super::scoring::{score_history, CreditScore};
use policy::{affordability_check, decide_tier};

/// Pre-persistence evaluation of an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub customer_id: CustomerId,
    pub credit_score: CreditScore,
    pub requested_rate: f64,
    pub existing_emis: f64,
    pub verdict: Verdict,
    /// Rate the loan would be booked at: corrected on approval, requested otherwise.
    pub interest_rate: f64,
    pub monthly_installment: f64,
}

impl Assessment {
    pub fn approved(&self) -> bool {
        self.verdict.is_approved()
    }

    fn into_result(self, loan_id: Option<LoanId>) -> DecisionResult {
        DecisionResult {
            loan_id,
            customer_id: self.customer_id,
            loan_approved: self.verdict.is_approved(),
            message: self.verdict.summary(),
            interest_rate: self.interest_rate,
            monthly_installment: self.monthly_installment,
            credit_score: self.credit_score.value,
        }
    }
}

/// Result returned to callers of the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub loan_id: Option<LoanId>,
    pub customer_id: CustomerId,
    pub loan_approved: bool,
    pub message: String,
    pub interest_rate: f64,
    pub monthly_installment: f64,
    pub credit_score: u32,
}

/// Sum of installments on the customer's existing loans, each priced on its own terms.
pub fn existing_installments(existing_loans: &[Loan]) -> Result<f64, LendingError> {
    existing_loans
        .iter()
        .try_fold(0.0, |total, loan| -> Result<f64, LendingError> {
            Ok(total + calculate_emi(loan.loan_amount, loan.interest_rate, loan.tenure)?)
        })
}

/// Run the affordability gate and the score tiers without side effects.
///
/// The gate takes precedence: when existing plus new installments exceed the
/// configured share of salary the application is rejected whatever the score.
pub fn assess_application(
    customer: &Customer,
    application: &LoanApplication,
    existing_loans: &[Loan],
    config: &PolicyConfig,
    today: NaiveDate,
) -> Result<Assessment, LendingError> {
    if application.customer_id != customer.id {
        return Err(LendingError::invalid(
            "customer_id",
            format!(
                "application targets customer {} but customer {} was supplied",
                application.customer_id, customer.id
            ),
        ));
    }

    let credit_score = score_history(customer, existing_loans, today);
    let existing_emis = existing_installments(existing_loans)?;
    let new_emi = calculate_emi(
        application.loan_amount,
        application.interest_rate,
        application.tenure,
    )?;

    let verdict = match affordability_check(existing_emis, new_emi, customer.monthly_salary, config)
    {
        Some(reason) => Verdict::Rejected(reason),
        None => decide_tier(credit_score.value, application.interest_rate, config),
    };

    let (interest_rate, monthly_installment) = match &verdict {
        Verdict::Approved {
            interest_rate,
            corrected: true,
        } => (
            *interest_rate,
            calculate_emi(application.loan_amount, *interest_rate, application.tenure)?,
        ),
        _ => (application.interest_rate, new_emi),
    };

    Ok(Assessment {
        customer_id: customer.id,
        credit_score,
        requested_rate: application.interest_rate,
        existing_emis,
        verdict,
        interest_rate,
        monthly_installment,
    })
}

/// Decide an application and, on approval, book the loan through `create_loan`.
///
/// `create_loan` is invoked at most once and is never retried; its failure
/// surfaces as [`LendingError::CreationFailed`].
pub fn evaluate_application<F>(
    customer: &Customer,
    application: &LoanApplication,
    existing_loans: &[Loan],
    config: &PolicyConfig,
    today: NaiveDate,
    create_loan: F,
) -> Result<DecisionResult, LendingError>
where
    F: FnOnce(NewLoan) -> Result<Loan, RepositoryError>,
{
    let assessment = assess_application(customer, application, existing_loans, config, today)?;
    if !assessment.approved() {
        return Ok(assessment.into_result(None));
    }

    let end_date = end_date_for(today, application.tenure)
        .ok_or_else(|| LendingError::invalid("tenure", "end date out of range"))?;
    let loan = create_loan(NewLoan {
        customer_id: customer.id,
        loan_amount: application.loan_amount,
        tenure: application.tenure,
        interest_rate: assessment.interest_rate,
        monthly_installment: assessment.monthly_installment,
        emis_paid_on_time: 0,
        approval_date: today,
        end_date,
    })
    .map_err(LendingError::CreationFailed)?;

    Ok(assessment.into_result(Some(loan.id)))
}

/// Decision without booking: the same verdict `evaluate_application` would give.
pub fn check_application(
    customer: &Customer,
    application: &LoanApplication,
    existing_loans: &[Loan],
    config: &PolicyConfig,
    today: NaiveDate,
) -> Result<DecisionResult, LendingError> {
    assess_application(customer, application, existing_loans, config, today)
        .map(|assessment| assessment.into_result(None))
}
