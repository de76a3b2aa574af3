//! Sidebar filter widgets: series selection, the three axis override lists,
//! and the date range.

use chrono::NaiveDate;
use eframe::egui;

use crate::axes::AxisId;
use crate::session::{Session, Workbook};

/// Transient sidebar state: date edit buffers and their parse error.
#[derive(Default)]
pub(crate) struct SidebarState {
    start_buf: String,
    end_buf: String,
    date_error: Option<&'static str>,
    synced: bool,
}

impl SidebarState {
    /// Refill the date buffers from the session's filters (after a workbook
    /// load or state restore).
    pub fn sync_date_buffers(&mut self, session: &Session) {
        if let Some(wb) = &session.workbook {
            self.start_buf = wb.filters.start.format("%Y-%m-%d").to_string();
            self.end_buf = wb.filters.end.format("%Y-%m-%d").to_string();
            self.date_error = None;
            self.synced = true;
        }
    }
}

pub(crate) fn show(ctx: &egui::Context, wb: &mut Workbook, state: &mut SidebarState) {
    if !state.synced {
        state.start_buf = wb.filters.start.format("%Y-%m-%d").to_string();
        state.end_buf = wb.filters.end.format("%Y-%m-%d").to_string();
        state.synced = true;
    }

    egui::SidePanel::left("filter_sidebar")
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Filter Data:");
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                series_section(ui, wb);
                for axis in [AxisId::Secondary, AxisId::Tertiary, AxisId::Quaternary] {
                    override_section(ui, wb, axis);
                }
                date_section(ui, wb, state);
            });
        });
}

/// "Series (LHS)": one checkbox per workbook column.
fn series_section(ui: &mut egui::Ui, wb: &mut Workbook) {
    egui::CollapsingHeader::new("Series (LHS)")
        .default_open(true)
        .show(ui, |ui| {
            let names = wb.table.series_names.clone();
            for name in names {
                let mut checked = wb.filters.selected.contains(&name);
                if ui.checkbox(&mut checked, &name).changed() {
                    wb.filters.toggle_selected(&wb.table, &name);
                }
            }
        });
}

/// One override list: checkboxes over the current selection only.
fn override_section(ui: &mut egui::Ui, wb: &mut Workbook, axis: AxisId) {
    let (title, list) = match axis {
        AxisId::Secondary => ("Series (RHS)", wb.filters.overrides.secondary.clone()),
        AxisId::Tertiary => ("Series (3rd axis)", wb.filters.overrides.tertiary.clone()),
        AxisId::Quaternary => ("Series (4th axis)", wb.filters.overrides.quaternary.clone()),
        AxisId::Primary => return,
    };
    egui::CollapsingHeader::new(title)
        .default_open(false)
        .show(ui, |ui| {
            let selected = wb.filters.selected.clone();
            for name in selected {
                let mut on = list.contains(&name);
                if ui.checkbox(&mut on, &name).changed() {
                    wb.filters.toggle_override(axis, &name);
                }
            }
        });
}

/// Start/end date edits with inline validation and a reset button.
fn date_section(ui: &mut egui::Ui, wb: &mut Workbook, state: &mut SidebarState) {
    ui.separator();
    ui.label("Start Date");
    let start_changed = ui.text_edit_singleline(&mut state.start_buf).changed();
    ui.label("End Date");
    let end_changed = ui.text_edit_singleline(&mut state.end_buf).changed();

    if start_changed || end_changed {
        match (parse_buf(&state.start_buf), parse_buf(&state.end_buf)) {
            (Some(start), Some(end)) if start <= end => {
                wb.filters.start = start;
                wb.filters.end = end;
                state.date_error = None;
            }
            (Some(_), Some(_)) => {
                state.date_error = Some("Start date is after end date");
            }
            _ => {
                state.date_error = Some("Dates must be YYYY-MM-DD");
            }
        }
    }
    if let Some(error) = state.date_error {
        ui.colored_label(egui::Color32::LIGHT_RED, error);
    }
    if ui
        .button("Reset range")
        .on_hover_text("Expand to the workbook's full date range")
        .clicked()
    {
        if let Some((min, max)) = wb.table.date_range() {
            wb.filters.start = min;
            wb.filters.end = max;
            state.start_buf = min.format("%Y-%m-%d").to_string();
            state.end_buf = max.format("%Y-%m-%d").to_string();
            state.date_error = None;
        }
    }
}

fn parse_buf(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}
