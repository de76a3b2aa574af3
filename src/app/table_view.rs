//! Filtered-rows table rendered with egui_table.

use eframe::egui;
use egui_table::{Column, HeaderRow, Table, TableDelegate};

use crate::data::table::SeriesTable;

struct RowsDelegate<'a> {
    table: &'a SeriesTable,
}

impl<'a> TableDelegate for RowsDelegate<'a> {
    fn header_cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::HeaderCellInfo) {
        let text = match cell.col_range.start {
            0 => "Date",
            1 => "Series",
            2 => "Value",
            _ => "",
        };
        ui.add_space(4.0);
        ui.strong(text);
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::CellInfo) {
        let Some(row) = self.table.rows.get(cell.row_nr as usize) else {
            return;
        };
        ui.add_space(4.0);
        match cell.col_nr {
            0 => {
                ui.label(row.date.format("%Y-%m-%d").to_string());
            }
            1 => {
                ui.add(egui::Label::new(&row.series).truncate());
            }
            2 => {
                ui.label(format!("{:.2}", row.value));
            }
            _ => {}
        }
    }
}

pub(crate) fn show(ui: &mut egui::Ui, filtered: &SeriesTable) {
    let mut delegate = RowsDelegate { table: filtered };
    let cols = vec![Column::new(112.0), Column::new(192.0), Column::new(112.0)];

    // Expand the table to the bottom of the panel.
    let avail_w = ui.available_width();
    let remaining_h = ui.available_height();
    let (rect, _resp) =
        ui.allocate_exact_size(egui::vec2(avail_w, remaining_h), egui::Sense::hover());
    let ui_builder = egui::UiBuilder::new()
        .max_rect(rect)
        .layout(egui::Layout::left_to_right(egui::Align::Min));
    let mut table_ui = ui.new_child(ui_builder);
    Table::new()
        .id_salt("filtered_rows_table")
        .num_rows(filtered.rows.len() as u64)
        .columns(cols)
        .headers(vec![HeaderRow::new(24.0)])
        .show(&mut table_ui, &mut delegate);
}
