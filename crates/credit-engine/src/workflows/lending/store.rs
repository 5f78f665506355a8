use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Customer, CustomerId, Loan, LoanId, NewCustomer, NewLoan};
use super::repository::{CustomerRepository, LoanRepository, RepositoryError};

/// In-process store backing the command line and tests.
///
/// Id sequences always continue after the highest id seen, including ids
/// supplied through bulk ingestion.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLendingStore {
    state: Arc<Mutex<StoreState>>,
}

#[derive(Debug)]
struct StoreState {
    customers: BTreeMap<CustomerId, Customer>,
    loans: BTreeMap<LoanId, Loan>,
    next_customer_id: u64,
    next_loan_id: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            customers: BTreeMap::new(),
            loans: BTreeMap::new(),
            next_customer_id: 1,
            next_loan_id: 1,
        }
    }
}

impl StoreState {
    fn phone_taken_by_other(&self, phone_number: &str, id: Option<CustomerId>) -> bool {
        self.customers
            .values()
            .any(|customer| customer.phone_number == phone_number && Some(customer.id) != id)
    }
}

/// Hand out the next id, failing once the sequence has no room left.
fn allocate(sequence: &mut u64, kind: &str) -> Result<u64, RepositoryError> {
    let id = *sequence;
    *sequence = id
        .checked_add(1)
        .ok_or_else(|| RepositoryError::Unavailable(format!("{kind} id sequence exhausted")))?;
    Ok(id)
}

impl InMemoryLendingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

impl CustomerRepository for InMemoryLendingStore {
    fn register(
        &self,
        customer: NewCustomer,
        approved_limit: u64,
    ) -> Result<Customer, RepositoryError> {
        let mut state = self.lock()?;
        if state.phone_taken_by_other(&customer.phone_number, None) {
            return Err(RepositoryError::Conflict(format!(
                "phone number {}",
                customer.phone_number
            )));
        }

        let id = CustomerId(allocate(&mut state.next_customer_id, "customer")?);
        let stored = Customer {
            id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            age: customer.age,
            phone_number: customer.phone_number,
            monthly_salary: customer.monthly_salary,
            approved_limit,
        };
        state.customers.insert(id, stored.clone());
        Ok(stored)
    }

    fn upsert_customer(&self, customer: Customer) -> Result<Customer, RepositoryError> {
        let mut state = self.lock()?;
        if state.phone_taken_by_other(&customer.phone_number, Some(customer.id)) {
            return Err(RepositoryError::Conflict(format!(
                "phone number {}",
                customer.phone_number
            )));
        }

        state.next_customer_id = state.next_customer_id.max(customer.id.0.saturating_add(1));
        state.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    fn customer(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.lock()?.customers.get(&id).cloned())
    }

    fn customers(&self, limit: usize) -> Result<Vec<Customer>, RepositoryError> {
        Ok(self.lock()?.customers.values().take(limit).cloned().collect())
    }

    fn remove_customer(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if state.customers.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        state.loans.retain(|_, loan| loan.customer_id != id);
        Ok(())
    }
}

impl LoanRepository for InMemoryLendingStore {
    fn create_loan(&self, loan: NewLoan) -> Result<Loan, RepositoryError> {
        let mut state = self.lock()?;
        if !state.customers.contains_key(&loan.customer_id) {
            return Err(RepositoryError::NotFound);
        }

        let id = LoanId(allocate(&mut state.next_loan_id, "loan")?);
        let stored = Loan::from_new(id, loan);
        state.loans.insert(id, stored.clone());
        Ok(stored)
    }

    fn upsert_loan(&self, loan: Loan) -> Result<Loan, RepositoryError> {
        let mut state = self.lock()?;
        if !state.customers.contains_key(&loan.customer_id) {
            return Err(RepositoryError::NotFound);
        }

        state.next_loan_id = state.next_loan_id.max(loan.id.0.saturating_add(1));
        state.loans.insert(loan.id, loan.clone());
        Ok(loan)
    }

    fn loan(&self, id: LoanId) -> Result<Option<Loan>, RepositoryError> {
        Ok(self.lock()?.loans.get(&id).cloned())
    }

    fn loans_for_customer(&self, id: CustomerId) -> Result<Vec<Loan>, RepositoryError> {
        Ok(self
            .lock()?
            .loans
            .values()
            .filter(|loan| loan.customer_id == id)
            .cloned()
            .collect())
    }

    fn loan_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.loans.len())
    }
}
