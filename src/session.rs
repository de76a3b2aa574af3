//! Explicit per-window session state.
//!
//! Everything the dashboard renders from lives here and is passed into the
//! render entry points each frame. There are no ambient globals: closing the
//! window drops the session, and restoring one (see [`crate::persistence`])
//! rebuilds it explicitly.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::auth::StaticCredentials;
use crate::axes::{AxisId, AxisOverrides};
use crate::data::loader::{load_workbook, LoadError};
use crate::data::table::SeriesTable;

// ─────────────────────────────────────────────────────────────────────────────
// FilterState
// ─────────────────────────────────────────────────────────────────────────────

/// Sidebar filter selections: which series to plot, which axes to override,
/// and the inclusive date range.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Selected series, in workbook column order.
    pub selected: Vec<String>,
    pub overrides: AxisOverrides,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FilterState {
    /// Default filters for a freshly loaded table: everything selected over
    /// the full date range.
    pub fn for_table(table: &SeriesTable) -> FilterState {
        let (start, end) = table
            .date_range()
            .unwrap_or_else(|| (NaiveDate::MIN, NaiveDate::MAX));
        FilterState {
            selected: table.series_names.clone(),
            overrides: AxisOverrides::default(),
            start,
            end,
        }
    }

    /// Reconcile restored or stale filters with the table they now apply to:
    /// unknown series are dropped everywhere, override lists stay subsets of
    /// the selection, and the date range is clamped to the data.
    pub fn revalidate(&mut self, table: &SeriesTable) {
        self.selected.retain(|s| table.series_names.contains(s));
        self.overrides.retain_selected(&self.selected);
        if let Some((min, max)) = table.date_range() {
            self.start = self.start.clamp(min, max);
            self.end = self.end.clamp(min, max);
        }
        if self.end < self.start {
            std::mem::swap(&mut self.start, &mut self.end);
        }
    }

    /// Toggle a series in or out of the selection, keeping workbook column
    /// order and pruning overrides that lost their series.
    pub fn toggle_selected(&mut self, table: &SeriesTable, name: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == name) {
            self.selected.remove(pos);
        } else {
            self.selected = table
                .series_names
                .iter()
                .filter(|s| self.selected.contains(s) || s.as_str() == name)
                .cloned()
                .collect();
        }
        self.overrides.retain_selected(&self.selected);
    }

    /// Toggle a series in or out of one of the override lists. Lists keep
    /// selection order so the axis legend reads top-to-bottom like the
    /// sidebar. `Primary` is not a list; toggling it is a no-op.
    pub fn toggle_override(&mut self, axis: AxisId, name: &str) {
        let list = match axis {
            AxisId::Primary => return,
            AxisId::Secondary => &mut self.overrides.secondary,
            AxisId::Tertiary => &mut self.overrides.tertiary,
            AxisId::Quaternary => &mut self.overrides.quaternary,
        };
        if let Some(pos) = list.iter().position(|s| s == name) {
            list.remove(pos);
        } else {
            let selected = &self.selected;
            let mut kept: Vec<String> = selected
                .iter()
                .filter(|s| list.contains(s) || s.as_str() == name)
                .cloned()
                .collect();
            std::mem::swap(list, &mut kept);
        }
    }

    /// The filtered view of `table` under these filters.
    pub fn apply(&self, table: &SeriesTable) -> SeriesTable {
        table.filter(&self.selected, self.start, self.end)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Workbook / Session
// ─────────────────────────────────────────────────────────────────────────────

/// A loaded workbook plus the filters currently applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub path: PathBuf,
    pub table: SeriesTable,
    pub filters: FilterState,
}

/// All state for one dashboard window.
#[derive(Default)]
pub struct Session {
    pub auth: StaticCredentials,
    pub workbook: Option<Workbook>,
}

impl Session {
    pub fn new(auth: StaticCredentials) -> Self {
        Session {
            auth,
            workbook: None,
        }
    }

    /// Load (or reload) a workbook file. Existing filters are revalidated
    /// against the new table rather than reset, so swapping in an updated
    /// file keeps the user's selections where they still apply.
    pub fn load_workbook(&mut self, path: &Path) -> Result<(), LoadError> {
        let table = load_workbook(path)?.melt();
        tracing::info!(path = %path.display(), rows = table.rows.len(), "workbook loaded");
        let filters = match self.workbook.take() {
            Some(prev) if prev.path.as_path() == path => {
                let mut filters = prev.filters;
                filters.revalidate(&table);
                filters
            }
            _ => FilterState::for_table(&table),
        };
        self.workbook = Some(Workbook {
            path: path.to_path_buf(),
            table,
            filters,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{LongRow, SeriesTable};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn table() -> SeriesTable {
        SeriesTable {
            rows: vec![
                LongRow {
                    date: d(2024, 1, 1),
                    series: "A".into(),
                    value: 1.0,
                },
                LongRow {
                    date: d(2024, 3, 1),
                    series: "B".into(),
                    value: 2.0,
                },
            ],
            series_names: vec!["A".into(), "B".into()],
        }
    }

    #[test]
    fn defaults_select_everything_over_full_range() {
        let f = FilterState::for_table(&table());
        assert_eq!(f.selected, vec!["A".to_string(), "B".to_string()]);
        assert_eq!((f.start, f.end), (d(2024, 1, 1), d(2024, 3, 1)));
    }

    #[test]
    fn revalidate_drops_unknown_series_and_clamps_dates() {
        let mut f = FilterState::for_table(&table());
        f.selected.push("Gone".into());
        f.overrides.secondary.push("Gone".into());
        f.start = d(2020, 1, 1);
        f.end = d(2030, 1, 1);
        f.revalidate(&table());
        assert_eq!(f.selected, vec!["A".to_string(), "B".to_string()]);
        assert!(f.overrides.secondary.is_empty());
        assert_eq!((f.start, f.end), (d(2024, 1, 1), d(2024, 3, 1)));
    }

    #[test]
    fn toggle_override_keeps_selection_order() {
        let t = table();
        let mut f = FilterState::for_table(&t);
        f.toggle_override(AxisId::Secondary, "B");
        f.toggle_override(AxisId::Secondary, "A");
        assert_eq!(
            f.overrides.secondary,
            vec!["A".to_string(), "B".to_string()]
        );
        f.toggle_override(AxisId::Secondary, "B");
        assert_eq!(f.overrides.secondary, vec!["A".to_string()]);
        f.toggle_override(AxisId::Primary, "A");
        assert_eq!(f.overrides.secondary, vec!["A".to_string()]);
    }

    #[test]
    fn toggle_keeps_column_order() {
        let t = table();
        let mut f = FilterState::for_table(&t);
        f.toggle_selected(&t, "A");
        assert_eq!(f.selected, vec!["B".to_string()]);
        f.toggle_selected(&t, "A");
        assert_eq!(f.selected, vec!["A".to_string(), "B".to_string()]);
    }
}
