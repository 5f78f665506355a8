use serde::Serialize;

use super::domain::{CustomerSummary, LoanId};

/// Single loan with its owner, as exposed by the loan lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanView {
    pub loan_id: LoanId,
    pub customer: CustomerSummary,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub monthly_installment: f64,
    pub tenure: u32,
}

/// One row of a customer's loan listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerLoanView {
    pub loan_id: LoanId,
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub monthly_installment: f64,
    pub repayments_left: u32,
}
