use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Salary multiple used when deriving a customer's approved limit.
pub const APPROVED_LIMIT_SALARY_MONTHS: u64 = 36;

/// Approved limits are rounded to the nearest multiple of this amount.
pub const APPROVED_LIMIT_ROUNDING: u64 = 100_000;

/// Identifier wrapper for registered customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for stored loans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoanId(pub u64);

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered borrower. The engine only ever reads customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: String,
    pub monthly_salary: u64,
    pub approved_limit: u64,
}

impl Customer {
    pub fn summary(&self) -> CustomerSummary {
        CustomerSummary {
            customer_id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            age: self.age,
        }
    }
}

/// Onboarding payload. The approved limit is derived, never supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: String,
    pub monthly_salary: u64,
}

/// Contact details exposed alongside a single loan view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub age: u32,
}

/// `round(salary * 36 / 100000) * 100000`, with ties rounded to even.
///
/// `None` when the limit does not fit in a `u64`.
pub fn approved_limit_for(monthly_salary: u64) -> Option<u64> {
    let multiples = (monthly_salary as f64 * APPROVED_LIMIT_SALARY_MONTHS as f64)
        / APPROVED_LIMIT_ROUNDING as f64;
    let multiples = multiples.round_ties_even();
    if multiples >= u64::MAX as f64 {
        return None;
    }
    (multiples as u64).checked_mul(APPROVED_LIMIT_ROUNDING)
}

/// A loan owned by exactly one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub customer_id: CustomerId,
    pub loan_amount: f64,
    pub tenure: u32,
    pub interest_rate: f64,
    pub monthly_installment: f64,
    pub emis_paid_on_time: u32,
    pub approval_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Loan {
    pub fn from_new(id: LoanId, loan: NewLoan) -> Self {
        Self {
            id,
            customer_id: loan.customer_id,
            loan_amount: loan.loan_amount,
            tenure: loan.tenure,
            interest_rate: loan.interest_rate,
            monthly_installment: loan.monthly_installment,
            emis_paid_on_time: loan.emis_paid_on_time,
            approval_date: loan.approval_date,
            end_date: loan.end_date,
        }
    }

    /// Whole months between `today` and the end date, never negative.
    pub fn repayments_left(&self, today: NaiveDate) -> u32 {
        let years = self.end_date.year() as i64 - today.year() as i64;
        let months = self.end_date.month() as i64 - today.month() as i64;
        (years * 12 + months).max(0) as u32
    }
}

/// Loan record produced by an approved decision, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoan {
    pub customer_id: CustomerId,
    pub loan_amount: f64,
    pub tenure: u32,
    pub interest_rate: f64,
    pub monthly_installment: f64,
    pub emis_paid_on_time: u32,
    pub approval_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// `approval_date + tenure` calendar months, clamped to the last day of the month.
pub fn end_date_for(approval_date: NaiveDate, tenure: u32) -> Option<NaiveDate> {
    approval_date.checked_add_months(Months::new(tenure))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn approved_limit_rounds_to_nearest_lakh() {
        assert_eq!(approved_limit_for(50_000), Some(1_800_000));
        assert_eq!(approved_limit_for(60_000), Some(2_200_000));
        assert_eq!(approved_limit_for(1_000), Some(0));
    }

    #[test]
    fn approved_limit_reports_salaries_too_large_to_represent() {
        assert_eq!(approved_limit_for(600_000_000_000_000_000), None);
        assert_eq!(approved_limit_for(u64::MAX), None);
    }

    #[test]
    fn end_date_clamps_to_month_end() {
        assert_eq!(end_date_for(date(2025, 1, 31), 1), Some(date(2025, 2, 28)));
        assert_eq!(end_date_for(date(2025, 3, 15), 12), Some(date(2026, 3, 15)));
    }

    #[test]
    fn repayments_left_never_goes_negative() {
        let loan = Loan {
            id: LoanId(1),
            customer_id: CustomerId(1),
            loan_amount: 10_000.0,
            tenure: 12,
            interest_rate: 10.0,
            monthly_installment: 879.16,
            emis_paid_on_time: 0,
            approval_date: date(2024, 1, 10),
            end_date: date(2025, 1, 10),
        };

        assert_eq!(loan.repayments_left(date(2024, 7, 1)), 6);
        assert_eq!(loan.repayments_left(date(2026, 1, 1)), 0);
    }
}
