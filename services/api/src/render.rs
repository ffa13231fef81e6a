use crate::infra::build_desk;
use clap::Args;
use retention_eligibility::config::AppConfig;
use retention_eligibility::error::AppError;
use retention_eligibility::workflows::retention::{EligibilityResult, RetentionError};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Contract (asset) number to verify, e.g. 123456
    pub(crate) identifier: String,
    /// Override the contract spreadsheet path
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Print the result as JSON instead of the text panel
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn render_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        identifier,
        dataset,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(path) = dataset {
        config.dataset.path = path;
    }

    let desk = build_desk(&config);
    match desk.check(&identifier) {
        Ok(result) if json => {
            let payload = serde_json::to_string_pretty(&result.view())
                .map_err(|err| AppError::Io(err.into()))?;
            println!("{payload}");
            Ok(())
        }
        Ok(result) => {
            print!("{}", result_panel(&result));
            Ok(())
        }
        Err(RetentionError::Evaluation(err)) => {
            eprintln!("{err}");
            Ok(())
        }
        Err(RetentionError::Dataset(err)) => Err(err.into()),
    }
}

pub(crate) fn result_panel(result: &EligibilityResult) -> String {
    let mut panel = String::new();
    let _ = writeln!(panel, "Contract summary: {}", result.contract_id);
    let _ = writeln!(panel, "- Time installed: {}", result.labels.time_installed);
    let _ = writeln!(panel, "- Monthly fee: {}", result.labels.monthly_fee);
    let _ = writeln!(
        panel,
        "- Discount remaining: {}",
        result.labels.discount_remaining
    );
    let _ = writeln!(panel);
    let _ = writeln!(panel, "{}", result.verdict.headline());

    let reasons = result.reason_summaries();
    if !reasons.is_empty() {
        let _ = writeln!(panel, "\nBlocking reasons");
        for reason in &reasons {
            let _ = writeln!(panel, "- {reason}");
        }
        let _ = writeln!(panel);
    }
    let _ = writeln!(panel, "{}", result.verdict.guidance());
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use retention_eligibility::workflows::retention::{
        ContractId, ContractRecord, Dataset, EligibilityEvaluator,
    };
    use rust_decimal::Decimal;

    fn evaluate(discount: f64) -> EligibilityResult {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .expect("valid date")
            .and_hms_opt(9, 0, 0)
            .expect("valid time");
        let dataset = Dataset::new(
            "memory.csv",
            vec![ContractRecord {
                contract_id: ContractId("123456".to_string()),
                installed_at: now - Duration::days(100),
                monthly_fee: Decimal::new(8000, 2),
                discount_months_remaining: discount,
                source_row: 2,
            }],
        );
        EligibilityEvaluator::default()
            .evaluate(&dataset, "123456", now)
            .expect("found")
    }

    #[test]
    fn eligible_panel_points_to_the_offer_system() {
        let panel = result_panel(&evaluate(0.0));

        assert!(panel.contains("Contract summary: 123456"));
        assert!(panel.contains("- Time installed: 100 days"));
        assert!(panel.contains("- Monthly fee: R$ 80.00"));
        assert!(panel.contains("Customer eligible for retention!"));
        assert!(panel.contains("Salesforce"));
        assert!(!panel.contains("Blocking reasons"));
    }

    #[test]
    fn blocked_panel_lists_reasons_and_manual_flow() {
        let panel = result_panel(&evaluate(2.0));

        assert!(panel.contains("- Customer already has an active offer (2 months remaining)."));
        assert!(panel.ends_with("Follow the retention-by-argument flow.\n"));
    }
}
