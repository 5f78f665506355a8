use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use super::decision::{self, DecisionResult, PolicyConfig};
use super::domain::{approved_limit_for, Customer, CustomerId, LoanId, NewCustomer};
use super::error::LendingError;
use super::installment::calculate_emi;
use super::intake::LoanApplication;
use super::repository::{CustomerRepository, LoanRepository, RepositoryError};
use super::scoring::{score_history, CreditScore};
use super::views::{CustomerLoanView, LoanView};

/// Source of the current date for recency scoring and loan booking.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

const MAX_PHONE_DIGITS: usize = 15;

/// Service composing the repository with the scoring and decision engine.
pub struct LendingService<R> {
    repository: Arc<R>,
    policy: PolicyConfig,
    clock: Clock,
    customer_locks: Mutex<HashMap<CustomerId, Arc<Mutex<()>>>>,
}

impl<R> LendingService<R>
where
    R: CustomerRepository + LoanRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: PolicyConfig) -> Self {
        Self {
            repository,
            policy,
            clock: Arc::new(|| Local::now().date_naive()),
            customer_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Onboard a customer, deriving the approved limit from salary.
    pub fn register(&self, customer: NewCustomer) -> Result<Customer, LendingError> {
        validate_registration(&customer)?;
        let approved_limit = approved_limit_for(customer.monthly_salary).ok_or_else(|| {
            LendingError::invalid("monthly_salary", "too large to derive an approved limit")
        })?;
        if approved_limit == 0 {
            return Err(LendingError::invalid(
                "monthly_salary",
                "too low to derive an approved limit",
            ));
        }

        let stored = self.repository.register(customer, approved_limit)?;
        info!(customer_id = %stored.id, approved_limit, "customer registered");
        Ok(stored)
    }

    /// Current creditworthiness score with its component trail.
    pub fn score(&self, customer_id: CustomerId) -> Result<CreditScore, LendingError> {
        let customer = self.customer(customer_id)?;
        let loans = self.repository.loans_for_customer(customer_id)?;
        let score = score_history(&customer, &loans, self.today());
        debug!(customer_id = %customer_id, score = score.value, basis = ?score.basis, "credit score computed");
        Ok(score)
    }

    /// Decide an application without booking a loan.
    pub fn check_eligibility(
        &self,
        application: &LoanApplication,
    ) -> Result<DecisionResult, LendingError> {
        let customer = self.customer(application.customer_id)?;
        let loans = self.repository.loans_for_customer(customer.id)?;
        let result =
            decision::check_application(&customer, application, &loans, &self.policy, self.today())?;
        log_decision("eligibility checked", &result);
        Ok(result)
    }

    /// Decide an application and book the loan when approved.
    ///
    /// Decisions for the same customer run one at a time so the affordability
    /// gate always sees loans booked by a concurrent call.
    pub fn create_loan(
        &self,
        application: &LoanApplication,
    ) -> Result<DecisionResult, LendingError> {
        let customer_id = self.customer(application.customer_id)?.id;
        let lock = self.customer_lock(customer_id)?;
        let outcome = match lock.lock() {
            Ok(_serialized) => self.decide_and_book(application),
            Err(_) => Err(LendingError::from(RepositoryError::Unavailable(
                "customer lock poisoned".to_string(),
            ))),
        };
        drop(lock);
        self.release_customer_lock(customer_id);

        let result = outcome?;
        log_decision("loan application decided", &result);
        Ok(result)
    }

    fn decide_and_book(
        &self,
        application: &LoanApplication,
    ) -> Result<DecisionResult, LendingError> {
        let customer = self.customer(application.customer_id)?;
        let loans = self.repository.loans_for_customer(customer.id)?;
        decision::evaluate_application(
            &customer,
            application,
            &loans,
            &self.policy,
            self.today(),
            |loan| self.repository.create_loan(loan),
        )
        .inspect_err(|err| {
            if let LendingError::CreationFailed(source) = err {
                warn!(customer_id = %customer.id, error = %source, "loan creation failed");
            }
        })
    }

    pub fn view_loan(&self, loan_id: LoanId) -> Result<LoanView, LendingError> {
        let loan = self
            .repository
            .loan(loan_id)?
            .ok_or(LendingError::LoanNotFound(loan_id))?;
        let customer = self.customer(loan.customer_id)?;

        Ok(LoanView {
            loan_id,
            customer: customer.summary(),
            loan_amount: loan.loan_amount,
            interest_rate: loan.interest_rate,
            monthly_installment: calculate_emi(loan.loan_amount, loan.interest_rate, loan.tenure)?,
            tenure: loan.tenure,
        })
    }

    pub fn loans_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CustomerLoanView>, LendingError> {
        let customer = self.customer(customer_id)?;
        let today = self.today();

        self.repository
            .loans_for_customer(customer.id)?
            .into_iter()
            .map(|loan| -> Result<CustomerLoanView, LendingError> {
                Ok(CustomerLoanView {
                    loan_id: loan.id,
                    loan_amount: loan.loan_amount,
                    interest_rate: loan.interest_rate,
                    monthly_installment: calculate_emi(
                        loan.loan_amount,
                        loan.interest_rate,
                        loan.tenure,
                    )?,
                    repayments_left: loan.repayments_left(today),
                })
            })
            .collect()
    }

    fn customer(&self, customer_id: CustomerId) -> Result<Customer, LendingError> {
        self.repository
            .customer(customer_id)?
            .ok_or(LendingError::CustomerNotFound(customer_id))
    }

    fn customer_lock(&self, customer_id: CustomerId) -> Result<Arc<Mutex<()>>, LendingError> {
        let mut locks = self
            .customer_locks
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lock table poisoned".to_string()))?;
        Ok(Arc::clone(locks.entry(customer_id).or_default()))
    }

    /// Drop the customer's lock entry once no other call holds it.
    fn release_customer_lock(&self, customer_id: CustomerId) {
        if let Ok(mut locks) = self.customer_locks.lock() {
            if locks
                .get(&customer_id)
                .is_some_and(|lock| Arc::strong_count(lock) == 1)
            {
                locks.remove(&customer_id);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_customer_locks(&self) -> usize {
        self.customer_locks
            .lock()
            .map(|locks| locks.len())
            .unwrap_or_default()
    }
}

fn log_decision(event: &'static str, result: &DecisionResult) {
    if result.loan_approved {
        info!(
            customer_id = %result.customer_id,
            loan_id = ?result.loan_id.map(|id| id.0),
            score = result.credit_score,
            interest_rate = result.interest_rate,
            monthly_installment = result.monthly_installment,
            "{event}: approved"
        );
    } else {
        info!(
            customer_id = %result.customer_id,
            score = result.credit_score,
            monthly_installment = result.monthly_installment,
            reason = %result.message,
            "{event}: rejected"
        );
    }
}

fn validate_registration(customer: &NewCustomer) -> Result<(), LendingError> {
    if customer.first_name.trim().is_empty() {
        return Err(LendingError::invalid("first_name", "must not be empty"));
    }
    if customer.last_name.trim().is_empty() {
        return Err(LendingError::invalid("last_name", "must not be empty"));
    }
    let phone = customer.phone_number.trim();
    if phone.is_empty() || phone.len() > MAX_PHONE_DIGITS {
        return Err(LendingError::invalid(
            "phone_number",
            format!("must have between 1 and {MAX_PHONE_DIGITS} characters"),
        ));
    }
    if customer.monthly_salary == 0 {
        return Err(LendingError::invalid("monthly_salary", "must be positive"));
    }
    Ok(())
}
