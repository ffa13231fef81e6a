mod mapping;
mod normalizer;
mod parser;

use super::domain::{ContractId, ContractRecord, Dataset};
use mapping::ColumnMap;
use parser::RawTable;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

pub use mapping::{
    CONTRACT_ID_COLUMN, DISCOUNT_MONTHS_COLUMN, INSTALL_DATE_COLUMN, MONTHLY_FEE_COLUMN,
};

/// Reasons the contract base could not be loaded. All of them are terminal
/// for the process; malformed discount values are not an error.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset file '{}' not found; ask support to add it", .path.display())]
    NotAvailable { path: PathBuf },
    #[error("unsupported dataset format '{extension}' (expected xlsx, xlsm, xls, ods or csv)")]
    UnsupportedFormat { extension: String },
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read workbook '{}': {message}", .path.display())]
    Workbook { path: PathBuf, message: String },
    #[error("workbook '{}' has no worksheet with a header row", .path.display())]
    EmptyWorkbook { path: PathBuf },
    #[error("required column '{column}' is missing")]
    MissingColumn { column: &'static str },
    #[error("row {row}: unable to parse install date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: unable to parse monthly fee '{value}'")]
    InvalidFee { row: usize, value: String },
}

impl DatasetError {
    pub fn is_not_available(&self) -> bool {
        matches!(self, DatasetError::NotAvailable { .. })
    }
}

pub struct ContractLoader;

impl ContractLoader {
    /// Loads the base, choosing the reader from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::NotAvailable {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let table = match extension.as_str() {
            "csv" => {
                let file = File::open(path).map_err(|err| match err.kind() {
                    ErrorKind::NotFound => DatasetError::NotAvailable {
                        path: path.to_path_buf(),
                    },
                    _ => DatasetError::Io(err),
                })?;
                parser::read_csv(file)?
            }
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => parser::read_workbook(path)?,
            _ => return Err(DatasetError::UnsupportedFormat { extension }),
        };

        build_dataset(path, table)
    }

    pub fn from_csv_reader<R: Read>(
        reader: R,
        source: impl AsRef<Path>,
    ) -> Result<Dataset, DatasetError> {
        let table = parser::read_csv(reader)?;
        build_dataset(source.as_ref(), table)
    }
}

fn build_dataset(source: &Path, table: RawTable) -> Result<Dataset, DatasetError> {
    let columns = ColumnMap::resolve(&table.headers)?;
    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let id_cell = row.cell(columns.contract_id);
        let date_cell = row.cell(columns.install_date);
        let fee_cell = row.cell(columns.monthly_fee);

        let installed_at =
            normalizer::install_datetime(date_cell).ok_or_else(|| DatasetError::InvalidDate {
                row: row.line,
                value: normalizer::identifier_text(date_cell),
            })?;
        let monthly_fee =
            normalizer::monthly_fee(fee_cell).ok_or_else(|| DatasetError::InvalidFee {
                row: row.line,
                value: normalizer::identifier_text(fee_cell),
            })?;

        records.push(ContractRecord {
            contract_id: ContractId::normalize(&normalizer::identifier_text(id_cell)),
            installed_at,
            monthly_fee,
            discount_months_remaining: normalizer::discount_months(
                columns.discount_months.map(|column| row.cell(column)),
            ),
            source_row: row.line,
        });
    }

    if columns.discount_months.is_none() {
        info!(
            column = DISCOUNT_MONTHS_COLUMN,
            "discount column absent; treating every contract as having no active offer"
        );
    }

    Ok(Dataset::new(source, records))
}

/// Process-wide handle to the contract base. The first call to
/// [`ContractSource::dataset`] reads the file; every later call, from any
/// thread, gets the same outcome without touching the disk again.
#[derive(Debug)]
pub struct ContractSource {
    path: PathBuf,
    loaded: OnceLock<Result<Arc<Dataset>, Arc<DatasetError>>>,
}

impl ContractSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceLock::new(),
        }
    }

    /// Handle that is already populated, bypassing the file system.
    pub fn preloaded(dataset: Dataset) -> Self {
        Self {
            path: dataset.source().to_path_buf(),
            loaded: OnceLock::from(Ok(Arc::new(dataset))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    pub fn dataset(&self) -> Result<Arc<Dataset>, Arc<DatasetError>> {
        self.loaded.get_or_init(|| self.load()).clone()
    }

    fn load(&self) -> Result<Arc<Dataset>, Arc<DatasetError>> {
        info!(path = %self.path.display(), "loading contract base");

        match ContractLoader::from_path(&self.path) {
            Ok(dataset) => {
                if dataset.duplicate_ids() > 0 {
                    warn!(
                        duplicates = dataset.duplicate_ids(),
                        "contract base repeats identifiers; lookups use the first row"
                    );
                }
                info!(records = dataset.len(), "contract base loaded");
                Ok(Arc::new(dataset))
            }
            Err(err) => {
                error!(path = %self.path.display(), %err, "contract base unavailable");
                Err(Arc::new(err))
            }
        }
    }
}
