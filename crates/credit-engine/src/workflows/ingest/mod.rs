//! Bulk import of customer and loan datasets exported from spreadsheets.

mod parser;

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::workflows::lending::domain::{Customer, CustomerId, Loan, LoanId};
use crate::workflows::lending::repository::{CustomerRepository, LoanRepository, RepositoryError};
use parser::{parse_date, parse_rows, CustomerRow, LoanRow};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
    #[error("line {line}: customer {customer_id} does not exist")]
    UnknownCustomer { line: usize, customer_id: CustomerId },
    #[error("could not store imported record: {0}")]
    Repository(#[from] RepositoryError),
}

/// Number of rows upserted by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
}

pub struct LendingImporter;

impl LendingImporter {
    pub fn customers_from_path<P, R>(path: P, repository: &R) -> Result<ImportSummary, ImportError>
    where
        P: AsRef<Path>,
        R: CustomerRepository,
    {
        let file = std::fs::File::open(path)?;
        Self::customers_from_reader(file, repository)
    }

    /// Upsert customers by id. Rows are validated before anything is stored.
    pub fn customers_from_reader<Rd, R>(
        reader: Rd,
        repository: &R,
    ) -> Result<ImportSummary, ImportError>
    where
        Rd: Read,
        R: CustomerRepository,
    {
        let customers = parse_rows::<_, CustomerRow>(reader)?
            .into_iter()
            .map(|(line, row)| customer_from_row(line, row))
            .collect::<Result<Vec<_>, _>>()?;

        for customer in &customers {
            repository.upsert_customer(customer.clone())?;
        }

        info!(imported = customers.len(), "customer dataset imported");
        Ok(ImportSummary {
            imported: customers.len(),
        })
    }

    pub fn loans_from_path<P, R>(path: P, repository: &R) -> Result<ImportSummary, ImportError>
    where
        P: AsRef<Path>,
        R: CustomerRepository + LoanRepository,
    {
        let file = std::fs::File::open(path)?;
        Self::loans_from_reader(file, repository)
    }

    /// Upsert loans by id. Every referenced customer must already exist.
    pub fn loans_from_reader<Rd, R>(reader: Rd, repository: &R) -> Result<ImportSummary, ImportError>
    where
        Rd: Read,
        R: CustomerRepository + LoanRepository,
    {
        let loans = parse_rows::<_, LoanRow>(reader)?
            .into_iter()
            .map(|(line, row)| {
                let loan = loan_from_row(line, row)?;
                if repository.customer(loan.customer_id)?.is_none() {
                    return Err(ImportError::UnknownCustomer {
                        line,
                        customer_id: loan.customer_id,
                    });
                }
                Ok(loan)
            })
            .collect::<Result<Vec<_>, ImportError>>()?;

        for loan in &loans {
            repository.upsert_loan(loan.clone())?;
        }

        info!(imported = loans.len(), "loan dataset imported");
        Ok(ImportSummary {
            imported: loans.len(),
        })
    }
}

fn invalid(line: usize, reason: impl Into<String>) -> ImportError {
    ImportError::InvalidRow {
        line,
        reason: reason.into(),
    }
}

fn customer_from_row(line: usize, row: CustomerRow) -> Result<Customer, ImportError> {
    if row.phone_number.is_empty() {
        return Err(invalid(line, "phone number is empty"));
    }
    if row.monthly_salary == 0 {
        return Err(invalid(line, "monthly salary must be positive"));
    }
    if row.approved_limit == 0 {
        return Err(invalid(line, "approved limit must be positive"));
    }

    Ok(Customer {
        id: CustomerId(row.customer_id),
        first_name: row.first_name,
        last_name: row.last_name,
        age: row.age,
        phone_number: row.phone_number,
        monthly_salary: row.monthly_salary,
        approved_limit: row.approved_limit,
    })
}

fn loan_from_row(line: usize, row: LoanRow) -> Result<Loan, ImportError> {
    if !(row.loan_amount.is_finite() && row.loan_amount > 0.0) {
        return Err(invalid(line, "loan amount must be positive"));
    }
    if row.tenure == 0 {
        return Err(invalid(line, "tenure must be at least one month"));
    }
    if !(row.interest_rate.is_finite() && row.interest_rate >= 0.0) {
        return Err(invalid(line, "interest rate must not be negative"));
    }
    if row.emis_paid_on_time > row.tenure {
        return Err(invalid(
            line,
            format!(
                "{} EMIs paid on time exceeds tenure of {}",
                row.emis_paid_on_time, row.tenure
            ),
        ));
    }

    let approval_date = parse_date(&row.approval_date)
        .ok_or_else(|| invalid(line, format!("unreadable approval date '{}'", row.approval_date)))?;
    let end_date = parse_date(&row.end_date)
        .ok_or_else(|| invalid(line, format!("unreadable end date '{}'", row.end_date)))?;
    if end_date < approval_date {
        return Err(invalid(line, "end date precedes approval date"));
    }

    Ok(Loan {
        id: LoanId(row.loan_id),
        customer_id: CustomerId(row.customer_id),
        loan_amount: row.loan_amount,
        tenure: row.tenure,
        interest_rate: row.interest_rate,
        monthly_installment: row.monthly_payment,
        emis_paid_on_time: row.emis_paid_on_time,
        approval_date,
        end_date,
    })
}
