mod config;
mod policy;
mod rules;

pub use config::EligibilityConfig;
pub use policy::{BlockReason, Verdict};
pub use rules::{ContractMetrics, LockOutcome};

use super::domain::{ContractId, Dataset};
use chrono::NaiveDateTime;
use policy::decide_verdict;
use serde::{Deserialize, Serialize};

/// Query-level failures. Neither produces an [`EligibilityResult`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Please enter a contract number.")]
    EmptyInput,
    #[error("Contract {identifier} not found in the active base.")]
    NotFound { identifier: String },
}

/// Stateless evaluator applying the lock thresholds to one contract.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    config: EligibilityConfig,
}

impl EligibilityEvaluator {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        dataset: &Dataset,
        identifier: &str,
        now: NaiveDateTime,
    ) -> Result<EligibilityResult, EvaluationError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(EvaluationError::EmptyInput);
        }

        let record = dataset
            .find(identifier)
            .ok_or_else(|| EvaluationError::NotFound {
                identifier: identifier.to_string(),
            })?;

        let metrics = rules::measure(record, now);
        let locks = rules::check_locks(&metrics, &self.config);
        let verdict = decide_verdict(&locks, &metrics, &self.config);
        let labels = MetricLabels {
            time_installed: format!("{} days", metrics.days_installed),
            monthly_fee: self.config.format_currency(metrics.monthly_fee),
            discount_remaining: format!("{} months", metrics.whole_discount_months()),
        };

        Ok(EligibilityResult {
            contract_id: record.contract_id.clone(),
            installed_at: record.installed_at,
            metrics,
            labels,
            locks,
            verdict,
        })
    }
}

/// Evaluates with the standard thresholds.
pub fn evaluate(
    dataset: &Dataset,
    identifier: &str,
    now: NaiveDateTime,
) -> Result<EligibilityResult, EvaluationError> {
    EligibilityEvaluator::default().evaluate(dataset, identifier, now)
}

/// Display strings for the three metric boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricLabels {
    pub time_installed: String,
    pub monthly_fee: String,
    pub discount_remaining: String,
}

/// Per-query result. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub contract_id: ContractId,
    pub installed_at: NaiveDateTime,
    pub metrics: ContractMetrics,
    pub labels: MetricLabels,
    pub locks: LockOutcome,
    pub verdict: Verdict,
}

impl EligibilityResult {
    pub fn is_eligible(&self) -> bool {
        self.verdict.is_eligible()
    }

    pub fn reason_summaries(&self) -> Vec<String> {
        self.verdict
            .reasons()
            .iter()
            .map(BlockReason::summary)
            .collect()
    }

    pub fn view(&self) -> EligibilityView {
        EligibilityView {
            contract_id: self.contract_id.clone(),
            installed_at: self.installed_at,
            days_installed: self.metrics.days_installed,
            monthly_fee: format!("{:.2}", self.metrics.monthly_fee.round_dp(2)),
            discount_months_remaining: self.metrics.whole_discount_months(),
            labels: self.labels.clone(),
            locks: self.locks,
            eligible: self.is_eligible(),
            headline: self.verdict.headline(),
            reasons: self.reason_summaries(),
            guidance: self.verdict.guidance(),
        }
    }
}

/// Flattened result handed to HTTP and CLI renderers.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityView {
    pub contract_id: ContractId,
    pub installed_at: NaiveDateTime,
    pub days_installed: i64,
    pub monthly_fee: String,
    pub discount_months_remaining: i64,
    pub labels: MetricLabels,
    pub locks: LockOutcome,
    pub eligible: bool,
    pub headline: &'static str,
    pub reasons: Vec<String>,
    pub guidance: String,
}
