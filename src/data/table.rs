//! Workbook tables: the wide shape as uploaded, and the long shape the rest
//! of the dashboard works with.
//!
//! A workbook sheet has one date column and one numeric column per series.
//! [`WideTable::melt`] reshapes that into one `(date, series, value)` row per
//! date×series pair, which is what filtering, the table view, and the chart
//! all consume.

use chrono::NaiveDate;

/// The uploaded sheet as parsed: one row per date, one column per series.
///
/// `columns[i].1` is parallel to `dates`; a `None` cell is a gap (blank or
/// non-numeric in the source) and produces no long-form row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<(String, Vec<Option<f64>>)>,
}

impl WideTable {
    /// Series names in sheet column order.
    pub fn series_names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Reshape wide → long: rows ordered by date first, then column order,
    /// matching how the sheet reads top-to-bottom, left-to-right.
    pub fn melt(&self) -> SeriesTable {
        let mut rows = Vec::new();
        for (row_idx, date) in self.dates.iter().enumerate() {
            for (name, values) in &self.columns {
                if let Some(Some(value)) = values.get(row_idx) {
                    rows.push(LongRow {
                        date: *date,
                        series: name.clone(),
                        value: *value,
                    });
                }
            }
        }
        SeriesTable {
            rows,
            series_names: self.series_names(),
        }
    }
}

/// One observation: a series' value on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub date: NaiveDate,
    pub series: String,
    pub value: f64,
}

/// Long-form table plus the unique series names in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesTable {
    pub rows: Vec<LongRow>,
    pub series_names: Vec<String>,
}

impl SeriesTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest dates present, if any rows exist.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Rows whose series is in `selected` and whose date lies in the
    /// inclusive range `[start, end]`. Row order is preserved. An empty
    /// selection yields an empty table, not an error.
    pub fn filter(&self, selected: &[String], start: NaiveDate, end: NaiveDate) -> SeriesTable {
        let rows = self
            .rows
            .iter()
            .filter(|r| r.date >= start && r.date <= end && selected.contains(&r.series))
            .cloned()
            .collect();
        SeriesTable {
            rows,
            series_names: self.series_names.clone(),
        }
    }

    /// Plot points for one series: `[epoch seconds, value]` in row order.
    ///
    /// Dates are midnight-UTC epoch seconds so the x-axis formatter can hand
    /// them back to chrono.
    pub fn points(&self, series: &str) -> Vec<[f64; 2]> {
        self.rows
            .iter()
            .filter(|r| r.series == series)
            .map(|r| [epoch_seconds(r.date), r.value])
            .collect()
    }
}

/// Midnight UTC of `date` as seconds since the UNIX epoch.
pub fn epoch_seconds(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp() as f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn melt_skips_gaps_and_keeps_column_order() {
        let wide = WideTable {
            dates: vec![d(2024, 1, 1), d(2024, 1, 2)],
            columns: vec![
                ("A".into(), vec![Some(1.0), None]),
                ("B".into(), vec![Some(2.0), Some(3.0)]),
            ],
        };
        let long = wide.melt();
        let got: Vec<(&str, f64)> = long
            .rows
            .iter()
            .map(|r| (r.series.as_str(), r.value))
            .collect();
        assert_eq!(got, vec![("A", 1.0), ("B", 2.0), ("B", 3.0)]);
        assert_eq!(long.series_names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let wide = WideTable {
            dates: vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)],
            columns: vec![("A".into(), vec![Some(1.0), Some(2.0), Some(3.0)])],
        };
        let long = wide.melt();
        let filtered = long.filter(&["A".into()], d(2024, 1, 1), d(2024, 1, 2));
        assert_eq!(filtered.rows.len(), 2);
        assert_eq!(filtered.rows[1].value, 2.0);
    }

    #[test]
    fn empty_selection_filters_to_empty() {
        let wide = WideTable {
            dates: vec![d(2024, 1, 1)],
            columns: vec![("A".into(), vec![Some(1.0)])],
        };
        let filtered = wide.melt().filter(&[], d(2020, 1, 1), d(2030, 1, 1));
        assert!(filtered.is_empty());
    }
}
