//! Retention-offer eligibility: load the contract base once, look a contract
//! up by identifier, and check the time, value, and active-offer locks.

pub mod domain;
pub mod evaluation;
pub mod router;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use domain::{ContractId, ContractRecord, Dataset};
pub use evaluation::{
    evaluate, BlockReason, ContractMetrics, EligibilityConfig, EligibilityEvaluator,
    EligibilityResult, EligibilityView, EvaluationError, LockOutcome, MetricLabels, Verdict,
};
pub use router::{eligibility_router, EligibilityQuery};
pub use service::{Clock, DatasetStatus, FixedClock, RetentionDesk, RetentionError, SystemClock};
pub use source::{ContractLoader, ContractSource, DatasetError};
