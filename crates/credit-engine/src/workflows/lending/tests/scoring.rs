use super::common::*;
use crate::workflows::lending::domain::CustomerId;
use crate::workflows::lending::{compute_score, score_history, ScoreBasis, ScoreFactor};
use approx::assert_relative_eq;

#[test]
fn empty_history_scores_one_hundred() {
    let customer = customer(1, 60_000, 2_200_000);

    let score = score_history(&customer, &[], today());

    assert_eq!(score.value, 100);
    assert_eq!(score.basis, ScoreBasis::NoHistory);
    assert!(score.components.is_empty());
}

#[test]
fn over_limit_history_scores_zero_regardless_of_repayment() {
    let customer = customer(2, 60_000, 100_000);
    let loans = vec![
        loan(
            1,
            customer.id,
            LoanSpec {
                amount: 90_000.0,
                tenure: 12,
                rate: 10.0,
                paid_on_time: 12,
                approved_on: date(2025, 1, 5),
            },
        ),
        loan(
            2,
            customer.id,
            LoanSpec {
                amount: 60_000.0,
                tenure: 6,
                rate: 11.0,
                paid_on_time: 6,
                approved_on: date(2025, 2, 5),
            },
        ),
    ];

    let score = score_history(&customer, &loans, today());

    assert_eq!(score.value, 0);
    assert_eq!(score.basis, ScoreBasis::OverLimit);
}

#[test]
fn history_components_are_summed_and_rounded() {
    let customer = customer(3, 90_000, 1_000_000);
    let loans = vec![
        loan(
            1,
            customer.id,
            LoanSpec {
                amount: 200_000.0,
                tenure: 12,
                rate: 12.0,
                paid_on_time: 12,
                approved_on: date(2025, 2, 1),
            },
        ),
        loan(
            2,
            customer.id,
            LoanSpec {
                amount: 100_000.0,
                tenure: 24,
                rate: 14.0,
                paid_on_time: 12,
                approved_on: date(2023, 5, 1),
            },
        ),
    ];

    let score = score_history(&customer, &loans, today());

    assert_eq!(score.basis, ScoreBasis::History);
    let points = |factor: ScoreFactor| {
        score
            .components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.points)
            .expect("component present")
    };
    assert_relative_eq!(
        points(ScoreFactor::OnTimeRepayment),
        200.0 / 3.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(points(ScoreFactor::LoanCount), 8.0);
    assert_relative_eq!(points(ScoreFactor::CurrentYearActivity), 10.0);
    assert_relative_eq!(points(ScoreFactor::LoanVolume), 3.0);
    assert_eq!(score.value, 88);
}

#[test]
fn additive_components_may_exceed_one_hundred() {
    let customer = customer(4, 500_000, 5_000_000);
    let loans: Vec<_> = (1..=10)
        .map(|id| {
            loan(
                id,
                customer.id,
                LoanSpec {
                    amount: 100_000.0,
                    tenure: 12,
                    rate: 10.0,
                    paid_on_time: 12,
                    approved_on: date(2025, 1, 1),
                },
            )
        })
        .collect();

    // 100 on-time + 40 count + 20 recency (capped) + 10 volume
    assert_eq!(compute_score(&customer, &loans, today()), 170);
}

#[test]
fn recency_and_volume_factors_are_capped() {
    let customer = customer(5, 500_000, 50_000_000);
    let loans: Vec<_> = (1..=3)
        .map(|id| {
            loan(
                id,
                CustomerId(5),
                LoanSpec {
                    amount: 1_000_000.0,
                    tenure: 10,
                    rate: 10.0,
                    paid_on_time: 0,
                    approved_on: date(2025, 3, 1),
                },
            )
        })
        .collect();

    let score = score_history(&customer, &loans, today());

    // 0 on-time + 12 count + min(30, 20) recency + min(30, 20) volume
    assert_eq!(score.value, 52);
}

#[test]
fn forty_point_fixture_scores_forty() {
    let customer = customer(6, 200_000, 5_000_000);
    let loans = forty_point_history(customer.id);

    assert_eq!(compute_score(&customer, &loans, today()), 40);
}
