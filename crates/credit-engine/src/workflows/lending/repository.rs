use super::domain::{Customer, CustomerId, Loan, LoanId, NewCustomer, NewLoan};

/// Customer storage so the service can be exercised in isolation.
pub trait CustomerRepository: Send + Sync {
    /// Store a new customer under a fresh id. Phone numbers are unique.
    fn register(
        &self,
        customer: NewCustomer,
        approved_limit: u64,
    ) -> Result<Customer, RepositoryError>;
    /// Insert or replace a customer under its own id (bulk ingestion).
    fn upsert_customer(&self, customer: Customer) -> Result<Customer, RepositoryError>;
    fn customer(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;
    fn customers(&self, limit: usize) -> Result<Vec<Customer>, RepositoryError>;
    /// Delete a customer together with every loan it owns.
    fn remove_customer(&self, id: CustomerId) -> Result<(), RepositoryError>;
}

/// Loan storage. Loans always belong to an existing customer.
pub trait LoanRepository: Send + Sync {
    fn create_loan(&self, loan: NewLoan) -> Result<Loan, RepositoryError>;
    /// Insert or replace a loan under its own id (bulk ingestion).
    fn upsert_loan(&self, loan: Loan) -> Result<Loan, RepositoryError>;
    fn loan(&self, id: LoanId) -> Result<Option<Loan>, RepositoryError>;
    fn loans_for_customer(&self, id: CustomerId) -> Result<Vec<Loan>, RepositoryError>;
    fn loan_count(&self) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
