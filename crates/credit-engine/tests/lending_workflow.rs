use std::sync::Arc;

use chrono::NaiveDate;
use credit_engine::workflows::ingest::LendingImporter;
use credit_engine::workflows::lending::{
    calculate_emi, compute_installment, CustomerId, InMemoryLendingStore, LendingService,
    LoanApplication, LoanApplicationPayload, LowScorePolicy, PolicyConfig, ScoreBasis,
};
use serde_json::json;

const CUSTOMERS: &str = "Customer ID,First Name,Last Name,Age,Phone Number,Monthly Salary,Approved Limit\n\
1,Aaron,Garcia,63,9629317944,90000,300000\n\
2,Carmelo,Burks,33,9732633120,100000,3600000\n\
3,Celestine,Bright,52,9425542862,60000,2200000\n";

const LOANS: &str = "Customer ID,Loan ID,Loan Amount,Tenure,Interest Rate,Monthly payment,EMIs paid on Time,Date of Approval,End Date\n\
1,8638,400000,60,16.71,9880,24,2022-03-16,2027-03-16\n\
2,5930,500000,24,12,23537,24,2023-01-10,2025-01-10\n\
2,5931,200000,12,10,17583,6,2025-02-01,2026-02-01\n";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

fn seeded_store() -> InMemoryLendingStore {
    let store = InMemoryLendingStore::new();
    LendingImporter::customers_from_reader(CUSTOMERS.as_bytes(), &store)
        .expect("customers import");
    LendingImporter::loans_from_reader(LOANS.as_bytes(), &store).expect("loans import");
    store
}

fn service(store: InMemoryLendingStore, policy: PolicyConfig) -> LendingService<InMemoryLendingStore> {
    LendingService::new(Arc::new(store), policy).with_clock(Arc::new(today))
}

fn application(payload: serde_json::Value) -> LoanApplication {
    let payload: LoanApplicationPayload =
        serde_json::from_value(payload).expect("payload deserializes");
    LoanApplication::try_from(payload).expect("payload validates")
}

#[test]
fn published_installment_examples_hold() {
    assert_eq!(compute_installment(120_000.0, 0.0, 12), Ok(10_000.0));
    let standard = compute_installment(100_000.0, 12.0, 12).expect("emi");
    assert!((standard - 8_884.88).abs() < 0.01);
}

#[test]
fn imported_history_drives_scores() {
    let service = service(seeded_store(), PolicyConfig::default());

    // 400,000 outstanding against a 300,000 limit
    let over_limit = service.score(CustomerId(1)).expect("score");
    assert_eq!(over_limit.value, 0);
    assert_eq!(over_limit.basis, ScoreBasis::OverLimit);

    // 30/36 on time (83.33) + 8 count + 10 current year + 7 volume
    let established = service.score(CustomerId(2)).expect("score");
    assert_eq!(established.value, 108);

    let fresh = service.score(CustomerId(3)).expect("score");
    assert_eq!(fresh.value, 100);
    assert_eq!(fresh.basis, ScoreBasis::NoHistory);
}

#[test]
fn fresh_customer_application_is_booked_at_requested_rate() {
    let store = seeded_store();
    let service = service(store, PolicyConfig::default());

    let result = service
        .create_loan(&application(json!({
            "customer_id": 3,
            "loan_amount": 50000,
            "interest_rate": 15,
            "tenure": 12
        })))
        .expect("decision succeeds");

    assert!(result.loan_approved);
    assert_eq!(result.interest_rate, 15.0);
    assert_eq!(
        result.monthly_installment,
        calculate_emi(50_000.0, 15.0, 12).expect("emi")
    );
    let loan_id = result.loan_id.expect("loan id");
    assert!(loan_id.0 > 8638, "new loans continue after imported ids");

    let listing = service
        .loans_for_customer(CustomerId(3))
        .expect("customer loans");
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].repayments_left, 12);
}

#[test]
fn low_score_policy_variants_diverge() {
    let request = application(json!({
        "customer_id": "1",
        "loan_amount": "10000",
        "interest_rate": "11",
        "tenure": "12"
    }));

    let rejecting = service(seeded_store(), PolicyConfig::default());
    let rejected = rejecting.check_eligibility(&request).expect("check");
    assert!(!rejected.loan_approved);
    assert!(rejected.message.contains("Credit score too low"));

    let flooring = service(
        seeded_store(),
        PolicyConfig::default().with_low_score(LowScorePolicy::FloorRate { minimum_rate: 20.0 }),
    );
    let approved = flooring.check_eligibility(&request).expect("check");
    assert!(approved.loan_approved);
    assert_eq!(approved.interest_rate, 20.0);
}

#[test]
fn existing_obligations_block_unaffordable_requests() {
    let service = service(seeded_store(), PolicyConfig::default());

    // existing EMIs ~41,000 against a 50,000 share of salary
    let result = service
        .check_eligibility(&application(json!({
            "customer_id": 2,
            "loan_amount": 200000,
            "interest_rate": 12,
            "tenure": 12
        })))
        .expect("check");

    assert!(!result.loan_approved);
    assert_eq!(result.loan_id, None);
    assert!(result.message.contains("EMI exceeds 50%"));
}
