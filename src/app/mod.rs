//! Main application module: the eframe app and its screens.
//!
//! | Sub-module     | Responsibility |
//! | -------------- | -------------- |
//! | [`login`]      | Login form shown until authentication succeeds |
//! | [`sidebar`]    | Series/axis/date filter widgets |
//! | [`table_view`] | Filtered-rows table (egui_table) |
//! | [`plot_view`]  | Multi-axis line chart (egui_plot) |
//! | [`run`]        | `run_dashboard()` entry point and icon loading |

mod login;
mod run;
mod sidebar;
mod table_view;
mod plot_view;

pub use run::run_dashboard;

use std::path::PathBuf;

use eframe::egui;

use crate::auth::{Authenticator, StaticCredentials};
use crate::axes::assign_axes;
use crate::chart::build_chart;
use crate::config::DashboardConfig;
use crate::data::export::write_filtered_csv;
use crate::persistence;
use crate::session::Session;

/// Session-level actions requested by UI widgets during a frame and applied
/// afterwards, so widget code never mutates the session it is rendering from.
#[derive(Default)]
pub(crate) struct FrameRequests {
    pub open_workbook: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub save_state: bool,
    pub logout: bool,
}

/// The dashboard application: configuration, explicit session state, and the
/// transient widget state (login form buffers, date edit buffers).
pub struct DashboardApp {
    config: DashboardConfig,
    session: Session,
    login: login::LoginForm,
    sidebar: sidebar::SidebarState,
    /// Last load/export error, shown in the top bar until the next action.
    status: Option<String>,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        let mut session = Session::new(StaticCredentials::new(config.credentials.clone()));
        let mut status = None;
        if let Some(state_file) = &config.state_file {
            if state_file.exists() {
                if let Err(e) = persistence::load_state(state_file, &mut session) {
                    tracing::warn!(error = %e, "could not restore dashboard state");
                    status = Some(format!("Could not restore previous session: {e}"));
                }
            }
        }
        DashboardApp {
            config,
            session,
            login: login::LoginForm::default(),
            sidebar: sidebar::SidebarState::default(),
            status,
        }
    }

    fn apply_requests(&mut self, requests: FrameRequests) {
        if let Some(path) = requests.open_workbook {
            self.status = None;
            if let Err(e) = self.session.load_workbook(&path) {
                tracing::error!(path = %path.display(), error = %e, "workbook load failed");
                self.status = Some(format!("Could not load {}: {e}", path.display()));
            } else {
                self.sidebar.sync_date_buffers(&self.session);
            }
        }
        if let Some(path) = requests.export_csv {
            if let Some(wb) = &self.session.workbook {
                let filtered = wb.filters.apply(&wb.table);
                self.status = match write_filtered_csv(&path, &filtered) {
                    Ok(()) => Some(format!("Exported {} rows", filtered.rows.len())),
                    Err(e) => Some(format!("Export failed: {e}")),
                };
            }
        }
        if requests.save_state {
            if let Some(state_file) = &self.config.state_file {
                if let Err(e) = persistence::save_state(state_file, &self.session) {
                    self.status = Some(format!("Could not save state: {e}"));
                }
            }
        }
        if requests.logout {
            self.session.auth.logout();
            self.login = login::LoginForm::default();
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context, requests: &mut FrameRequests) {
        let greeting = self
            .session
            .auth
            .current_user()
            .map(|id| format!("Hello, {}", id.username))
            .unwrap_or_default();
        egui::TopBottomPanel::top("dashboard_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.config.title);
                ui.separator();
                ui.label(greeting);
                if ui
                    .button(format!("{} Load workbook", egui_phosphor::regular::UPLOAD))
                    .on_hover_text("Open a CSV or XLSX workbook")
                    .clicked()
                {
                    requests.open_workbook = rfd::FileDialog::new()
                        .add_filter("Workbooks", &["csv", "xlsx"])
                        .pick_file();
                }
                if self.config.show_export && self.session.workbook.is_some() {
                    if ui
                        .button(format!("{} Export CSV", egui_phosphor::regular::EXPORT))
                        .on_hover_text("Save the filtered rows as CSV")
                        .clicked()
                    {
                        requests.export_csv = rfd::FileDialog::new()
                            .set_file_name("filtered.csv")
                            .add_filter("CSV", &["csv"])
                            .save_file();
                    }
                }
                if self.config.state_file.is_some() && ui.button("Save state").clicked() {
                    requests.save_state = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        requests.logout = true;
                    }
                    if let Some(status) = &self.status {
                        ui.label(egui::RichText::new(status).italics());
                    }
                });
            });
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.config.dark_theme {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        if self.session.auth.current_user().is_none() {
            self.login.show(ctx, &mut self.session.auth);
            return;
        }

        let mut requests = FrameRequests::default();
        self.top_bar(ctx, &mut requests);

        match &mut self.session.workbook {
            None => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label("Load a workbook to get started.");
                    });
                });
            }
            Some(wb) => {
                sidebar::show(ctx, wb, &mut self.sidebar);
                let filtered = wb.filters.apply(&wb.table);
                let layout = assign_axes(&wb.filters.selected, &wb.filters.overrides);
                let chart = build_chart(&filtered, &layout);
                egui::CentralPanel::default().show(ctx, |ui| {
                    let table_height = if self.config.show_table {
                        ui.available_height() * 0.35
                    } else {
                        0.0
                    };
                    let plot_height = ui.available_height() - table_height;
                    plot_view::show(ui, &chart, plot_height);
                    if self.config.show_table {
                        ui.separator();
                        table_view::show(ui, &filtered);
                    }
                });
            }
        }

        self.apply_requests(requests);
    }
}
