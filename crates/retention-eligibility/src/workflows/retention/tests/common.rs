use std::io::Cursor;
use std::sync::Arc;

use axum::response::Response;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::workflows::retention::domain::{ContractId, ContractRecord, Dataset};
use crate::workflows::retention::evaluation::{EligibilityConfig, EligibilityEvaluator};
use crate::workflows::retention::service::{FixedClock, RetentionDesk};
use crate::workflows::retention::source::{ContractLoader, ContractSource};

pub(super) const HEADER: &str =
    "FOZ_CodigoItem__c,InstallDate,FOZ_ValorTotal__c,FOZ_Periodo_de_Desconto_Restante__c";

pub(super) fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

pub(super) fn fee(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub(super) fn record(id: &str, days_ago: i64, monthly_fee: Decimal, discount: f64) -> ContractRecord {
    ContractRecord {
        contract_id: ContractId(id.to_string()),
        installed_at: now() - Duration::days(days_ago),
        monthly_fee,
        discount_months_remaining: discount,
        source_row: 2,
    }
}

pub(super) fn dataset(records: Vec<ContractRecord>) -> Dataset {
    Dataset::new("memory.csv", records)
}

pub(super) fn csv_dataset(csv: &str) -> Dataset {
    ContractLoader::from_csv_reader(Cursor::new(csv.to_string()), "inline.csv")
        .expect("inline csv loads")
}

pub(super) fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::new(EligibilityConfig::standard())
}

pub(super) fn desk_for(dataset: Dataset) -> Arc<RetentionDesk<FixedClock>> {
    Arc::new(RetentionDesk::with_clock(
        Arc::new(ContractSource::preloaded(dataset)),
        EligibilityConfig::standard(),
        FixedClock(now()),
    ))
}

pub(super) fn missing_desk() -> Arc<RetentionDesk<FixedClock>> {
    Arc::new(RetentionDesk::with_clock(
        Arc::new(ContractSource::new("./does-not-exist.xlsx")),
        EligibilityConfig::standard(),
        FixedClock(now()),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
