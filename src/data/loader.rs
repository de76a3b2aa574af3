//! Workbook ingestion: CSV and XLSX files into a [`WideTable`].
//!
//! Both formats share one shape: the first column is the date column, every
//! further header cell names a series. XLSX workbooks are read from the sheet
//! named `Data`. Blank or non-numeric value cells become gaps rather than
//! errors; everything structural is a [`LoadError`].

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;
use thiserror::Error;

use crate::data::table::WideTable;

/// Name of the XLSX sheet holding the data.
pub const DATA_SHEET: &str = "Data";

/// Date formats accepted in CSV cells and XLSX text cells, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read workbook: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no sheet named {0:?}")]
    MissingSheet(String),
    #[error("unrecognized date {0:?}")]
    BadDate(String),
    #[error("workbook contains no data rows")]
    Empty,
    #[error("unsupported workbook extension {0:?} (expected csv or xlsx)")]
    UnsupportedExtension(String),
}

/// Load a workbook by file extension: `.csv` or `.xlsx`.
pub fn load_workbook(path: &Path) -> Result<WideTable, LoadError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)?;
            load_csv(file)
        }
        "xlsx" | "xlsm" => load_xlsx(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Parse CSV from any reader. Split out from [`load_workbook`] so tests can
/// feed in-memory data.
pub fn load_csv<R: Read>(reader: R) -> Result<WideTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let series: Vec<String> = headers.iter().skip(1).map(|h| h.to_string()).collect();

    let mut table = WideTable {
        dates: Vec::new(),
        columns: series.into_iter().map(|name| (name, Vec::new())).collect(),
    };

    for record in rdr.records() {
        let record = record?;
        let date_cell = record.get(0).unwrap_or_default();
        if date_cell.is_empty() {
            continue;
        }
        table.dates.push(parse_date(date_cell)?);
        for (col_idx, (_, values)) in table.columns.iter_mut().enumerate() {
            let cell = record.get(col_idx + 1).unwrap_or_default();
            values.push(cell.parse::<f64>().ok());
        }
    }

    if table.dates.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(table)
}

/// Read the `Data` sheet of an XLSX workbook.
fn load_xlsx(path: &Path) -> Result<WideTable, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range(DATA_SHEET)
        .map_err(|_| LoadError::MissingSheet(DATA_SHEET.to_string()))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or(LoadError::Empty)?;
    let series: Vec<String> = header
        .iter()
        .skip(1)
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut table = WideTable {
        dates: Vec::new(),
        columns: series.into_iter().map(|name| (name, Vec::new())).collect(),
    };

    for row in rows {
        let Some(date_cell) = row.first() else {
            continue;
        };
        let Some(date) = cell_date(date_cell)? else {
            continue; // blank trailing rows
        };
        table.dates.push(date);
        for (col_idx, (_, values)) in table.columns.iter_mut().enumerate() {
            values.push(row.get(col_idx + 1).and_then(cell_number));
        }
    }

    if table.dates.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(table)
}

/// Interpret an XLSX cell as a date: serial date-time cells directly, text
/// cells through the same formats as CSV. `Ok(None)` means an empty cell.
fn cell_date(cell: &Data) -> Result<Option<NaiveDate>, LoadError> {
    match cell {
        Data::Empty => Ok(None),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|ndt| Some(ndt.date()))
            .ok_or_else(|| LoadError::BadDate(cell.to_string())),
        Data::String(s) if s.trim().is_empty() => Ok(None),
        Data::String(s) => parse_date(s.trim()).map(Some),
        other => Err(LoadError::BadDate(other.to_string())),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(v) => Some(*v),
        Data::Int(v) => Some(*v as f64),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, LoadError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| LoadError::BadDate(text.to_string()))
}
