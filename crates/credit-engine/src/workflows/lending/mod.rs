//! Credit decisioning: scoring, installment math, the tiered approval policy,
//! and the service that books approved loans through the repository traits.

pub mod decision;
pub mod domain;
mod error;
pub mod installment;
pub mod intake;
pub mod repository;
pub mod scoring;
pub mod service;
mod store;
mod views;

#[cfg(test)]
mod tests;

pub use decision::{
    assess_application, check_application, evaluate_application, existing_installments,
    Assessment, DecisionResult, LowScorePolicy, PolicyConfig, RateTier, RejectionReason, Verdict,
};
pub use domain::{
    approved_limit_for, end_date_for, Customer, CustomerId, CustomerSummary, Loan, LoanId,
    NewCustomer, NewLoan,
};
pub use error::LendingError;
pub use installment::{calculate_emi, InstallmentError};
pub use intake::{LoanApplication, LoanApplicationPayload};
pub use repository::{CustomerRepository, LoanRepository, RepositoryError};
pub use scoring::{
    compute_score, score_history, CreditScore, ScoreBasis, ScoreComponent, ScoreFactor,
};
pub use service::{Clock, LendingService};
pub use store::InMemoryLendingStore;
pub use views::{CustomerLoanView, LoanView};

/// Installment for `principal` at `annual_rate` percent over `tenure` months.
pub fn compute_installment(
    principal: f64,
    annual_rate: f64,
    tenure: u32,
) -> Result<f64, InstallmentError> {
    calculate_emi(principal, annual_rate, tenure)
}
