//! Login form shown until a user authenticates.

use eframe::egui;

use crate::auth::StaticCredentials;

/// Transient form state: edit buffers and the last error.
#[derive(Default)]
pub(crate) struct LoginForm {
    username: String,
    password: String,
    error: Option<&'static str>,
}

impl LoginForm {
    /// Render the form; on a successful submit the authenticator records the
    /// user and the caller switches to the dashboard on the next frame.
    pub fn show(&mut self, ctx: &egui::Context, auth: &mut StaticCredentials) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let panel_width = 280.0;
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.25);
                ui.heading("Please log in");
                ui.add_space(12.0);
                ui.allocate_ui(egui::vec2(panel_width, 0.0), |ui| {
                    ui.label("Username");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.username)
                            .desired_width(panel_width),
                    );
                    ui.label("Password");
                    let pass_edit = ui.add(
                        egui::TextEdit::singleline(&mut self.password)
                            .password(true)
                            .desired_width(panel_width),
                    );
                    ui.add_space(8.0);
                    let submitted = ui.button("Login").clicked()
                        || (pass_edit.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                    if submitted {
                        if auth.login(&self.username, &self.password) {
                            self.error = None;
                            self.password.clear();
                        } else {
                            self.error = Some("Invalid credentials. Please try again");
                            self.password.clear();
                        }
                    }
                    if let Some(error) = self.error {
                        ui.add_space(6.0);
                        ui.colored_label(egui::Color32::LIGHT_RED, error);
                    }
                });
            });
        });
    }
}
