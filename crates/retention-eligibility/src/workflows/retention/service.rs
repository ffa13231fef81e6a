use super::evaluation::{
    EligibilityConfig, EligibilityEvaluator, EligibilityResult, EvaluationError,
};
use super::source::{ContractSource, DatasetError};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Source of "now" for contract age calculations.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the server's local time zone, matching how install dates are
/// recorded in the spreadsheet.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Error raised by the retention desk.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RetentionError {
    #[error(transparent)]
    Dataset(Arc<DatasetError>),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Snapshot of the cached base for operators.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStatus {
    pub path: PathBuf,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_ids: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Entry point used by the HTTP routes and the CLI: one lookup per call
/// against the shared, load-once contract base.
pub struct RetentionDesk<C: Clock = SystemClock> {
    source: Arc<ContractSource>,
    evaluator: EligibilityEvaluator,
    clock: C,
}

impl RetentionDesk<SystemClock> {
    pub fn new(source: Arc<ContractSource>, config: EligibilityConfig) -> Self {
        Self::with_clock(source, config, SystemClock)
    }
}

impl<C: Clock> RetentionDesk<C> {
    pub fn with_clock(source: Arc<ContractSource>, config: EligibilityConfig, clock: C) -> Self {
        Self {
            source,
            evaluator: EligibilityEvaluator::new(config),
            clock,
        }
    }

    pub fn source(&self) -> &ContractSource {
        &self.source
    }

    pub fn source_handle(&self) -> Arc<ContractSource> {
        Arc::clone(&self.source)
    }

    pub fn check(&self, identifier: &str) -> Result<EligibilityResult, RetentionError> {
        let dataset = self.source.dataset().map_err(RetentionError::Dataset)?;
        let result = self
            .evaluator
            .evaluate(&dataset, identifier, self.clock.now());

        match &result {
            Ok(found) => info!(
                contract = %found.contract_id,
                eligible = found.is_eligible(),
                days_installed = found.metrics.days_installed,
                "eligibility evaluated"
            ),
            Err(err) => debug!(%err, "eligibility query rejected"),
        }

        result.map_err(RetentionError::from)
    }

    pub fn dataset_status(&self) -> DatasetStatus {
        let path = self.source.path().to_path_buf();
        match self.source.dataset() {
            Ok(dataset) => DatasetStatus {
                path,
                available: true,
                records: Some(dataset.len()),
                duplicate_ids: Some(dataset.duplicate_ids()),
                error: None,
            },
            Err(err) => DatasetStatus {
                path,
                available: false,
                records: None,
                duplicate_ids: None,
                error: Some(err.to_string()),
            },
        }
    }
}
