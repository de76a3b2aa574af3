//! Top-level entry point for running the dashboard as a native window.

use eframe::egui;

use crate::config::DashboardConfig;

use super::DashboardApp;

/// Launch the dashboard in a native window.
///
/// Builds a [`DashboardApp`] from the configuration (restoring persisted
/// state if a state file is configured), opens a native window, and enters
/// the eframe event loop. The call blocks until the window is closed.
pub fn run_dashboard(config: DashboardConfig) -> eframe::Result<()> {
    let title = config.title.clone();
    let app = DashboardApp::new(config);

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(1400.0, 900.0));
    if let Some(icon) = load_app_icon_svg() {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Rasterize the bundled `icon.svg` into an [`egui::IconData`] for the
/// window. Any read, parse, or render failure yields `None` and the window
/// keeps the platform default icon.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg = std::fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg")).ok()?;

    let tree = usvg::Tree::from_data(&svg, &usvg::Options::default()).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }

    // usvg gives the parsed tree; resvg rasterizes it into a tiny-skia pixmap
    // whose raw buffer is already the RGBA layout IconData wants.
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}
