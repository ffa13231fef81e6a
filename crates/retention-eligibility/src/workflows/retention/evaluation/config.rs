use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Thresholds and wording inputs for the three retention locks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Contracts must be strictly older than this many whole days.
    pub minimum_days_installed: i64,
    /// Monthly fee must be strictly above this amount.
    pub minimum_monthly_fee: Decimal,
    pub currency_symbol: String,
    /// External sales system agents are pointed to on an eligible verdict.
    pub offer_system: String,
}

impl EligibilityConfig {
    pub fn standard() -> Self {
        Self {
            minimum_days_installed: 90,
            minimum_monthly_fee: Decimal::new(7000, 2),
            currency_symbol: "R$".to_string(),
            offer_system: "Salesforce".to_string(),
        }
    }

    pub fn format_currency(&self, amount: Decimal) -> String {
        format!("{} {:.2}", self.currency_symbol, amount.round_dp(2))
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self::standard()
    }
}
