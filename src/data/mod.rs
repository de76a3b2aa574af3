//! Data layer: workbook tables, ingestion, and CSV export.

pub mod export;
pub mod loader;
pub mod table;

pub use loader::{load_workbook, LoadError};
pub use table::{LongRow, SeriesTable, WideTable};
