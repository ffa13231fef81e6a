use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Canonical contract identifier used for matching queries against the base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(pub String);

impl ContractId {
    /// Canonicalizes a stringified spreadsheet cell.
    ///
    /// A numeric id that went through float formatting ends in `.0`; only that
    /// single trailing artifact is dropped, internal `.0` sequences are kept.
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        let stripped = trimmed.strip_suffix(".0").unwrap_or(trimmed);
        Self(stripped.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One contract row after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractRecord {
    pub contract_id: ContractId,
    pub installed_at: NaiveDateTime,
    pub monthly_fee: Decimal,
    /// Always `>= 0`; absent or unparsable source values become `0`.
    pub discount_months_remaining: f64,
    /// 1-based spreadsheet row (the header is row 1).
    pub source_row: usize,
}

/// Contract base held in memory for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    records: Vec<ContractRecord>,
    duplicate_ids: usize,
}

impl Dataset {
    pub fn new(source: impl Into<PathBuf>, records: Vec<ContractRecord>) -> Self {
        let duplicate_ids = count_repeated(&records);

        Self {
            source: source.into(),
            records,
            duplicate_ids,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[ContractRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose identifier already appeared earlier in the base.
    pub fn duplicate_ids(&self) -> usize {
        self.duplicate_ids
    }

    /// First record, in source order, whose canonical id equals `identifier`.
    pub fn find(&self, identifier: &str) -> Option<&ContractRecord> {
        self.records
            .iter()
            .find(|record| record.contract_id.as_str() == identifier)
    }
}

fn count_repeated(records: &[ContractRecord]) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|record| !seen.insert(record.contract_id.as_str()))
        .count()
}
