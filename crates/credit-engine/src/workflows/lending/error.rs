use super::domain::{CustomerId, LoanId};
use super::installment::InstallmentError;
use super::repository::RepositoryError;

/// Error raised by the lending engine and service.
///
/// Rejected applications are not errors; they come back as decisions with
/// `approved = false`.
#[derive(Debug, thiserror::Error)]
pub enum LendingError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },
    #[error("customer {0} does not exist")]
    CustomerNotFound(CustomerId),
    #[error("loan {0} does not exist")]
    LoanNotFound(LoanId),
    #[error("interest rate or tenure too large")]
    Overflow,
    #[error("error creating loan: {0}")]
    CreationFailed(#[source] RepositoryError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl LendingError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<InstallmentError> for LendingError {
    fn from(value: InstallmentError) -> Self {
        match value {
            InstallmentError::InvalidInput { field, reason } => Self::invalid(field, reason),
            InstallmentError::RateOrTenureTooLarge => Self::Overflow,
        }
    }
}
