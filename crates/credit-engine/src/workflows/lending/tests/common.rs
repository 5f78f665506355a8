use std::sync::Arc;

use chrono::NaiveDate;

use crate::workflows::lending::domain::{Customer, CustomerId, Loan, LoanId, NewCustomer, NewLoan};
use crate::workflows::lending::repository::{CustomerRepository, LoanRepository, RepositoryError};
use crate::workflows::lending::{InMemoryLendingStore, LendingService, PolicyConfig};

pub(super) fn today() -> NaiveDate {
    date(2025, 6, 15)
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn customer(id: u64, monthly_salary: u64, approved_limit: u64) -> Customer {
    Customer {
        id: CustomerId(id),
        first_name: "Meera".to_string(),
        last_name: "Iyer".to_string(),
        age: 34,
        phone_number: format!("98{id:08}"),
        monthly_salary,
        approved_limit,
    }
}

pub(super) fn registration(phone_number: &str, monthly_salary: u64) -> NewCustomer {
    NewCustomer {
        first_name: "Kiran".to_string(),
        last_name: "Shah".to_string(),
        age: 29,
        phone_number: phone_number.to_string(),
        monthly_salary,
    }
}

pub(super) struct LoanSpec {
    pub amount: f64,
    pub tenure: u32,
    pub rate: f64,
    pub paid_on_time: u32,
    pub approved_on: NaiveDate,
}

pub(super) fn loan(id: u64, customer_id: CustomerId, spec: LoanSpec) -> Loan {
    Loan {
        id: LoanId(id),
        customer_id,
        loan_amount: spec.amount,
        tenure: spec.tenure,
        interest_rate: spec.rate,
        monthly_installment: 0.0,
        emis_paid_on_time: spec.paid_on_time,
        approval_date: spec.approved_on,
        end_date: crate::workflows::lending::end_date_for(spec.approved_on, spec.tenure)
            .expect("end date in range"),
    }
}

/// History scoring exactly 40: 16 on-time points, 4 for one loan, none for
/// recency, and the capped 20 for volume. Its installment is 20,000 a month.
pub(super) fn forty_point_history(customer_id: CustomerId) -> Vec<Loan> {
    vec![loan(
        1,
        customer_id,
        LoanSpec {
            amount: 2_000_000.0,
            tenure: 100,
            rate: 0.0,
            paid_on_time: 16,
            approved_on: date(2020, 1, 10),
        },
    )]
}

pub(super) fn service_with(
    store: InMemoryLendingStore,
    policy: PolicyConfig,
) -> LendingService<InMemoryLendingStore> {
    LendingService::new(Arc::new(store), policy).with_clock(Arc::new(today))
}

/// Store whose loan writes always fail, for exercising creation errors.
#[derive(Default)]
pub(super) struct ReadOnlyStore {
    inner: InMemoryLendingStore,
}

impl ReadOnlyStore {
    pub(super) fn with_customer(customer: Customer) -> Self {
        let store = Self::default();
        store
            .inner
            .upsert_customer(customer)
            .expect("seed customer");
        store
    }
}

impl CustomerRepository for ReadOnlyStore {
    fn register(
        &self,
        customer: NewCustomer,
        approved_limit: u64,
    ) -> Result<Customer, RepositoryError> {
        self.inner.register(customer, approved_limit)
    }

    fn upsert_customer(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        self.inner.upsert_customer(customer)
    }

    fn customer(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        self.inner.customer(id)
    }

    fn customers(&self, limit: usize) -> Result<Vec<Customer>, RepositoryError> {
        self.inner.customers(limit)
    }

    fn remove_customer(&self, id: CustomerId) -> Result<(), RepositoryError> {
        self.inner.remove_customer(id)
    }
}

impl LoanRepository for ReadOnlyStore {
    fn create_loan(&self, _loan: NewLoan) -> Result<Loan, RepositoryError> {
        Err(RepositoryError::Unavailable("read-only replica".to_string()))
    }

    fn upsert_loan(&self, _loan: Loan) -> Result<Loan, RepositoryError> {
        Err(RepositoryError::Unavailable("read-only replica".to_string()))
    }

    fn loan(&self, id: LoanId) -> Result<Option<Loan>, RepositoryError> {
        self.inner.loan(id)
    }

    fn loans_for_customer(&self, id: CustomerId) -> Result<Vec<Loan>, RepositoryError> {
        self.inner.loans_for_customer(id)
    }

    fn loan_count(&self) -> Result<usize, RepositoryError> {
        self.inner.loan_count()
    }
}
