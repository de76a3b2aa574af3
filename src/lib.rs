//! quadplot crate root: re-exports and module wiring.
//!
//! An interactive dashboard built on egui/eframe: a user logs in against a
//! configuration-supplied credential mapping, loads a spreadsheet workbook,
//! filters series and dates from the sidebar, and views the result as a line
//! chart on up to four y-axes plus a table of the filtered rows.
//!
//! Module map:
//! - `axes`: axis assignment and tick-format selection (the core logic)
//! - `data`: workbook tables, CSV/XLSX ingestion, CSV export
//! - `auth`: the authenticator seam and the static-credentials backend
//! - `session`: explicit per-window state and the sidebar filters
//! - `chart`: chart construction and tick/title formatting
//! - `config`: YAML configuration
//! - `persistence`: JSON save/restore of dashboard state
//! - `app`: the eframe application and `run_dashboard()`

pub mod app;
pub mod auth;
pub mod axes;
pub mod chart;
pub mod config;
pub mod data;
pub mod persistence;
pub mod session;

// Public re-exports for a compact external API
pub use app::run_dashboard;
pub use auth::{Authenticator, Identity, StaticCredentials};
pub use axes::{assign_axes, AxisFormat, AxisId, AxisLayout, AxisOverrides, ValueKind};
pub use chart::{build_chart, chart_title, format_tick, ChartSpec};
pub use config::DashboardConfig;
pub use data::{load_workbook, LoadError, SeriesTable, WideTable};
pub use session::{FilterState, Session, Workbook};
