use super::common::*;
use crate::workflows::retention::domain::ContractId;
use crate::workflows::retention::evaluation::{evaluate, BlockReason, EvaluationError};

#[test]
fn long_standing_high_value_contract_without_offer_is_eligible() {
    let data = dataset(vec![record("123456", 100, fee(8000), 0.0)]);

    let result = evaluator()
        .evaluate(&data, "123456", now())
        .expect("contract found");

    assert!(result.is_eligible());
    assert!(result.reason_summaries().is_empty());
    assert_eq!(result.metrics.days_installed, 100);
    assert_eq!(result.labels.time_installed, "100 days");
    assert_eq!(result.labels.monthly_fee, "R$ 80.00");
    assert_eq!(result.labels.discount_remaining, "0 months");
    assert_eq!(
        result.verdict.guidance(),
        "You may proceed with the offers shown in Salesforce."
    );
}

#[test]
fn active_discount_blocks_with_only_the_offer_reason() {
    let data = dataset(vec![record("123456", 100, fee(8000), 2.0)]);

    let result = evaluator()
        .evaluate(&data, "123456", now())
        .expect("contract found");

    assert!(!result.is_eligible());
    assert_eq!(
        result.reason_summaries(),
        vec!["Customer already has an active offer (2 months remaining).".to_string()]
    );
    assert_eq!(result.verdict.guidance(), "Follow the retention-by-argument flow.");
}

#[test]
fn time_lock_boundary_is_strict() {
    let data = dataset(vec![
        record("ninety", 90, fee(8000), 0.0),
        record("ninety-one", 91, fee(8000), 0.0),
    ]);

    let at_ninety = evaluator().evaluate(&data, "ninety", now()).expect("found");
    assert_eq!(at_ninety.metrics.days_installed, 90);
    assert!(!at_ninety.locks.time_lock_cleared);
    assert_eq!(
        at_ninety.reason_summaries(),
        vec!["Contract duration under 90 days.".to_string()]
    );

    let at_ninety_one = evaluator().evaluate(&data, "ninety-one", now()).expect("found");
    assert!(at_ninety_one.locks.time_lock_cleared);
    assert!(at_ninety_one.is_eligible());
}

#[test]
fn value_lock_boundary_is_strict() {
    let data = dataset(vec![
        record("seventy", 120, fee(7000), 0.0),
        record("seventy-and-a-cent", 120, fee(7001), 0.0),
    ]);

    let at_minimum = evaluator().evaluate(&data, "seventy", now()).expect("found");
    assert!(!at_minimum.locks.value_lock_cleared);
    assert_eq!(
        at_minimum.reason_summaries(),
        vec!["Monthly fee does not reach the minimum of R$ 70.00.".to_string()]
    );

    let above = evaluator()
        .evaluate(&data, "seventy-and-a-cent", now())
        .expect("found");
    assert!(above.locks.value_lock_cleared);
}

#[test]
fn active_offer_boundary() {
    let data = dataset(vec![
        record("none", 120, fee(9000), 0.0),
        record("one", 120, fee(9000), 1.0),
    ]);

    assert!(evaluator()
        .evaluate(&data, "none", now())
        .expect("found")
        .locks
        .no_active_offer);
    assert!(!evaluator()
        .evaluate(&data, "one", now())
        .expect("found")
        .locks
        .no_active_offer);
}

#[test]
fn fractional_discount_still_blocks_and_is_shown_truncated() {
    let data = dataset(vec![record("half", 120, fee(9000), 0.5)]);

    let result = evaluator().evaluate(&data, "half", now()).expect("found");

    assert!(!result.locks.no_active_offer);
    assert_eq!(result.labels.discount_remaining, "0 months");
    assert_eq!(
        result.verdict.reasons(),
        &[BlockReason::ActiveOffer {
            months_remaining: 0
        }]
    );
}

#[test]
fn every_failing_lock_is_reported_in_fixed_order() {
    let data = dataset(vec![record("new-cheap-promo", 10, fee(4990), 3.0)]);

    let result = evaluator()
        .evaluate(&data, "new-cheap-promo", now())
        .expect("found");

    assert_eq!(
        result.reason_summaries(),
        vec![
            "Contract duration under 90 days.".to_string(),
            "Monthly fee does not reach the minimum of R$ 70.00.".to_string(),
            "Customer already has an active offer (3 months remaining).".to_string(),
        ]
    );
    assert_eq!(
        result.verdict.headline(),
        "Customer NOT eligible for retention offers."
    );
}

#[test]
fn blank_identifier_is_rejected_before_lookup() {
    let data = dataset(vec![record("", 120, fee(9000), 0.0)]);

    assert_eq!(
        evaluator().evaluate(&data, "", now()),
        Err(EvaluationError::EmptyInput)
    );
    assert_eq!(
        evaluator().evaluate(&data, "   ", now()),
        Err(EvaluationError::EmptyInput)
    );
}

#[test]
fn unknown_identifier_reports_the_query() {
    let data = dataset(vec![record("123456", 120, fee(9000), 0.0)]);

    let error = evaluator()
        .evaluate(&data, " 999999 ", now())
        .expect_err("not in base");

    assert_eq!(
        error,
        EvaluationError::NotFound {
            identifier: "999999".to_string()
        }
    );
    assert_eq!(error.to_string(), "Contract 999999 not found in the active base.");
}

#[test]
fn lookup_matches_exactly_and_returns_the_normalized_query() {
    let data = csv_dataset(&format!(
        "{HEADER}\n123456.0,2025-01-01,80.00,0\n 654321 ,2025-01-01,80.00,0\n"
    ));

    for query in ["123456", " 654321 "] {
        let result = evaluate(&data, query, now()).expect("found");
        assert_eq!(result.contract_id, ContractId(query.trim().to_string()));
    }

    assert!(matches!(
        evaluate(&data, "12345", now()),
        Err(EvaluationError::NotFound { .. })
    ));
    assert!(matches!(
        evaluate(&data, "123456.0", now()),
        Err(EvaluationError::NotFound { .. })
    ));
}

#[test]
fn duplicate_identifiers_use_the_first_row() {
    let data = dataset(vec![
        record("777", 120, fee(9000), 0.0),
        record("777", 120, fee(9000), 4.0),
    ]);

    let result = evaluator().evaluate(&data, "777", now()).expect("found");

    assert!(result.is_eligible());
    assert_eq!(data.duplicate_ids(), 1);
}

#[test]
fn missing_discount_column_never_blocks_on_active_offer() {
    let data = csv_dataset(
        "FOZ_CodigoItem__c,InstallDate,FOZ_ValorTotal__c\n1,2025-01-01,10\n2,2025-05-30,99\n",
    );

    for id in ["1", "2"] {
        let result = evaluate(&data, id, now()).expect("found");
        assert!(result.locks.no_active_offer);
        assert!(result
            .verdict
            .reasons()
            .iter()
            .all(|reason| !matches!(reason, BlockReason::ActiveOffer { .. })));
    }
}

#[test]
fn view_carries_display_values() {
    let data = dataset(vec![record("123456", 100, fee(8000), 0.0)]);

    let view = evaluator()
        .evaluate(&data, "123456", now())
        .expect("found")
        .view();

    assert!(view.eligible);
    assert_eq!(view.monthly_fee, "80.00");
    assert_eq!(view.discount_months_remaining, 0);
    assert_eq!(view.headline, "Customer eligible for retention!");
}
