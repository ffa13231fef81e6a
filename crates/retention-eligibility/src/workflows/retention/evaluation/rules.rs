use super::super::domain::ContractRecord;
use super::config::EligibilityConfig;
use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Figures derived from a contract at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractMetrics {
    pub days_installed: i64,
    pub monthly_fee: Decimal,
    pub discount_months_remaining: f64,
}

impl ContractMetrics {
    /// Remaining months as shown to agents: truncated, never rounded.
    pub fn whole_discount_months(&self) -> i64 {
        self.discount_months_remaining.trunc() as i64
    }
}

/// Outcome of each lock; `true` means the lock no longer blocks an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockOutcome {
    pub time_lock_cleared: bool,
    pub value_lock_cleared: bool,
    pub no_active_offer: bool,
}

impl LockOutcome {
    pub fn all_cleared(&self) -> bool {
        self.time_lock_cleared && self.value_lock_cleared && self.no_active_offer
    }
}

pub(crate) fn measure(record: &ContractRecord, now: NaiveDateTime) -> ContractMetrics {
    ContractMetrics {
        days_installed: whole_days_between(record.installed_at, now),
        monthly_fee: record.monthly_fee,
        discount_months_remaining: record.discount_months_remaining,
    }
}

pub(crate) fn check_locks(metrics: &ContractMetrics, config: &EligibilityConfig) -> LockOutcome {
    LockOutcome {
        time_lock_cleared: metrics.days_installed > config.minimum_days_installed,
        value_lock_cleared: metrics.monthly_fee > config.minimum_monthly_fee,
        no_active_offer: metrics.discount_months_remaining <= 0.0,
    }
}

/// Floor of the elapsed time in days; an install date in the future yields a
/// negative count.
pub(crate) fn whole_days_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let elapsed = end.signed_duration_since(start);
    let days = elapsed.num_days();
    if elapsed < Duration::days(days) {
        days - 1
    } else {
        days
    }
}
