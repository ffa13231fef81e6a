use super::DatasetError;

pub const CONTRACT_ID_COLUMN: &str = "FOZ_CodigoItem__c";
pub const INSTALL_DATE_COLUMN: &str = "InstallDate";
pub const MONTHLY_FEE_COLUMN: &str = "FOZ_ValorTotal__c";
pub const DISCOUNT_MONTHS_COLUMN: &str = "FOZ_Periodo_de_Desconto_Restante__c";

/// Positions of the columns the loader understands. Everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    pub(crate) contract_id: usize,
    pub(crate) install_date: usize,
    pub(crate) monthly_fee: usize,
    pub(crate) discount_months: Option<usize>,
}

impl ColumnMap {
    pub(crate) fn resolve(headers: &[String]) -> Result<Self, DatasetError> {
        Ok(Self {
            contract_id: required(headers, CONTRACT_ID_COLUMN)?,
            install_date: required(headers, INSTALL_DATE_COLUMN)?,
            monthly_fee: required(headers, MONTHLY_FEE_COLUMN)?,
            discount_months: position(headers, DISCOUNT_MONTHS_COLUMN),
        })
    }
}

fn position(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

fn required(headers: &[String], name: &'static str) -> Result<usize, DatasetError> {
    position(headers, name).ok_or(DatasetError::MissingColumn { column: name })
}
