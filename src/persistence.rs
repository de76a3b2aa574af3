//! State persistence: save and load dashboard state to/from a JSON file.
//!
//! Serializable mirror types keep the live session types free of serde
//! concerns. Restoring re-loads the workbook from its recorded path and
//! revalidates the filters against whatever the file now contains.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::axes::AxisOverrides;
use crate::data::loader::LoadError;
use crate::session::{FilterState, Session};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to access state file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid state file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to restore workbook: {0}")]
    Workbook(#[from] LoadError),
}

// ---------- Serializable mirror types ----------

/// Serializable version of [`FilterState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterStateSerde {
    pub selected: Vec<String>,
    pub secondary: Vec<String>,
    pub tertiary: Vec<String>,
    pub quaternary: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<&FilterState> for FilterStateSerde {
    fn from(f: &FilterState) -> Self {
        FilterStateSerde {
            selected: f.selected.clone(),
            secondary: f.overrides.secondary.clone(),
            tertiary: f.overrides.tertiary.clone(),
            quaternary: f.overrides.quaternary.clone(),
            start: f.start,
            end: f.end,
        }
    }
}

impl FilterStateSerde {
    fn into_filters(self) -> FilterState {
        FilterState {
            selected: self.selected,
            overrides: AxisOverrides {
                secondary: self.secondary,
                tertiary: self.tertiary,
                quaternary: self.quaternary,
            },
            start: self.start,
            end: self.end,
        }
    }
}

/// On-disk dashboard state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardState {
    pub workbook_path: Option<std::path::PathBuf>,
    pub filters: Option<FilterStateSerde>,
}

// ---------- Save / load ----------

/// Snapshot the session's workbook path and filters to `path` as JSON.
pub fn save_state(path: &Path, session: &Session) -> Result<(), StateError> {
    let state = DashboardState {
        workbook_path: session.workbook.as_ref().map(|wb| wb.path.clone()),
        filters: session
            .workbook
            .as_ref()
            .map(|wb| FilterStateSerde::from(&wb.filters)),
    };
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &state)?;
    tracing::info!(path = %path.display(), "dashboard state saved");
    Ok(())
}

/// Restore a session from `path`: re-load the workbook and apply the saved
/// filters, revalidated against the reloaded table. A state file pointing at
/// a workbook that has since moved surfaces the load error to the caller.
pub fn load_state(path: &Path, session: &mut Session) -> Result<(), StateError> {
    let file = std::fs::File::open(path)?;
    let state: DashboardState = serde_json::from_reader(file)?;
    if let Some(workbook_path) = state.workbook_path {
        session.load_workbook(&workbook_path)?;
        if let (Some(wb), Some(serde_filters)) = (session.workbook.as_mut(), state.filters) {
            let mut filters = serde_filters.into_filters();
            filters.revalidate(&wb.table);
            wb.filters = filters;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn filter_mirror_round_trips_through_json() {
        let filters = FilterState {
            selected: vec!["A".into(), "B".into()],
            overrides: AxisOverrides {
                secondary: vec!["B".into()],
                tertiary: vec![],
                quaternary: vec![],
            },
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        };
        let json = serde_json::to_string(&FilterStateSerde::from(&filters)).unwrap();
        let back: FilterStateSerde = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_filters(), filters);
    }
}
