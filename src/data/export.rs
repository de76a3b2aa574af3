//! Export the filtered long-form rows to a CSV file.

use std::path::Path;

use crate::data::table::SeriesTable;

/// Write `table` as `date,series,value` rows.
pub fn write_filtered_csv<P: AsRef<Path>>(path: P, table: &SeriesTable) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["date", "series", "value"])?;
    for row in &table.rows {
        wtr.write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.series.clone(),
            row.value.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
