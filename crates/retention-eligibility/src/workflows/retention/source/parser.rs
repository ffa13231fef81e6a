use super::DatasetError;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;
use std::io::Read;
use std::path::Path;

/// Cell value as it came out of the spreadsheet, before any column typing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl RawCell {
    fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&Data> for RawCell {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => RawCell::Empty,
            Data::String(value) => RawCell::Text(value.clone()),
            Data::Int(value) => RawCell::Int(*value),
            Data::Float(value) => RawCell::Float(*value),
            Data::Bool(value) => RawCell::Bool(*value),
            Data::DateTime(value) => match value.as_datetime() {
                Some(datetime) => RawCell::DateTime(datetime),
                None => RawCell::Float(value.as_f64()),
            },
            Data::DateTimeIso(value) | Data::DurationIso(value) => RawCell::Text(value.clone()),
            Data::Error(error) => RawCell::Text(error.to_string()),
        }
    }
}

/// Header plus data rows; blank rows are already dropped.
#[derive(Debug, Default)]
pub(crate) struct RawTable {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<RawRow>,
}

#[derive(Debug)]
pub(crate) struct RawRow {
    /// 1-based spreadsheet row number.
    pub(crate) line: usize,
    pub(crate) cells: Vec<RawCell>,
}

impl RawRow {
    pub(crate) fn cell(&self, column: usize) -> &RawCell {
        self.cells.get(column).unwrap_or(&RawCell::Empty)
    }
}

impl RawTable {
    fn push_row(&mut self, line: usize, cells: Vec<RawCell>) {
        if cells.iter().all(RawCell::is_blank) {
            return;
        }
        self.rows.push(RawRow { line, cells });
    }
}

pub(crate) fn read_csv<R: Read>(reader: R) -> Result<RawTable, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut table = RawTable {
        headers: csv_reader
            .headers()?
            .iter()
            .map(|header| header.trim_start_matches('\u{feff}').trim().to_string())
            .collect(),
        rows: Vec::new(),
    };

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let cells = record
            .iter()
            .map(|value| {
                if value.is_empty() {
                    RawCell::Empty
                } else {
                    RawCell::Text(value.to_string())
                }
            })
            .collect();
        table.push_row(index + 2, cells);
    }

    Ok(table)
}

/// Reads the first worksheet of an xlsx/xlsm/xls/ods workbook.
pub(crate) fn read_workbook(path: &Path) -> Result<RawTable, DatasetError> {
    let mut workbook = open_workbook_auto(path).map_err(|err| DatasetError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DatasetError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|err| DatasetError::Workbook {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or_else(|| DatasetError::EmptyWorkbook {
        path: path.to_path_buf(),
    })?;

    let mut table = RawTable {
        headers: header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
        rows: Vec::new(),
    };

    // calamine ranges start at the first non-empty cell
    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    for (offset, row) in rows.enumerate() {
        table.push_row(
            first_line + offset + 1,
            row.iter().map(RawCell::from).collect(),
        );
    }

    Ok(table)
}
