use super::config::EligibilityConfig;
use super::rules::{ContractMetrics, LockOutcome};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const ELIGIBLE_HEADLINE: &str = "Customer eligible for retention!";
const NOT_ELIGIBLE_HEADLINE: &str = "Customer NOT eligible for retention offers.";
const ARGUMENT_FLOW_GUIDANCE: &str = "Follow the retention-by-argument flow.";

/// Final answer shown to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    Eligible { offer_system: String },
    NotEligible { reasons: Vec<BlockReason> },
}

impl Verdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Verdict::Eligible { .. })
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::Eligible { .. } => ELIGIBLE_HEADLINE,
            Verdict::NotEligible { .. } => NOT_ELIGIBLE_HEADLINE,
        }
    }

    pub fn guidance(&self) -> String {
        match self {
            Verdict::Eligible { offer_system } => {
                format!("You may proceed with the offers shown in {offer_system}.")
            }
            Verdict::NotEligible { .. } => ARGUMENT_FLOW_GUIDANCE.to_string(),
        }
    }

    pub fn reasons(&self) -> &[BlockReason] {
        match self {
            Verdict::Eligible { .. } => &[],
            Verdict::NotEligible { reasons } => reasons,
        }
    }
}

/// Lock that kept a contract from qualifying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockReason {
    ContractTooRecent {
        minimum_days: i64,
    },
    FeeBelowMinimum {
        minimum_fee: Decimal,
        currency_symbol: String,
    },
    ActiveOffer {
        months_remaining: i64,
    },
}

impl BlockReason {
    pub fn summary(&self) -> String {
        match self {
            BlockReason::ContractTooRecent { minimum_days } => {
                format!("Contract duration under {minimum_days} days.")
            }
            BlockReason::FeeBelowMinimum {
                minimum_fee,
                currency_symbol,
            } => format!(
                "Monthly fee does not reach the minimum of {} {:.2}.",
                currency_symbol,
                minimum_fee.round_dp(2)
            ),
            BlockReason::ActiveOffer { months_remaining } => format!(
                "Customer already has an active offer ({months_remaining} months remaining)."
            ),
        }
    }
}

/// Reasons are listed time, value, then active offer.
pub(crate) fn decide_verdict(
    locks: &LockOutcome,
    metrics: &ContractMetrics,
    config: &EligibilityConfig,
) -> Verdict {
    if locks.all_cleared() {
        return Verdict::Eligible {
            offer_system: config.offer_system.clone(),
        };
    }

    let mut reasons = Vec::with_capacity(3);
    if !locks.time_lock_cleared {
        reasons.push(BlockReason::ContractTooRecent {
            minimum_days: config.minimum_days_installed,
        });
    }
    if !locks.value_lock_cleared {
        reasons.push(BlockReason::FeeBelowMinimum {
            minimum_fee: config.minimum_monthly_fee,
            currency_symbol: config.currency_symbol.clone(),
        });
    }
    if !locks.no_active_offer {
        reasons.push(BlockReason::ActiveOffer {
            months_remaining: metrics.whole_discount_months(),
        });
    }

    Verdict::NotEligible { reasons }
}
