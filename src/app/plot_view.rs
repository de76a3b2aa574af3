//! Multi-axis line chart rendered with egui_plot.
//!
//! egui_plot draws in a single y space, so the [`ChartSpec`] already maps
//! every non-anchor axis into the anchor axis's range. The left tick labels
//! belong to the anchor axis; hover readouts and the per-axis range strip go
//! back through each axis's inverse transform.

use std::collections::HashMap;

use eframe::egui;
use egui_plot::{Legend, Line, Plot};

use crate::chart::{format_tick, AxisStyle, ChartSpec};

pub(crate) fn show(ui: &mut egui::Ui, chart: &ChartSpec, height: f32) {
    if !chart.title.is_empty() {
        ui.heading(&chart.title);
    }
    axis_strip(ui, chart);

    // The anchor axis owns the y tick labels; its transform is the identity.
    let anchor_style = chart.anchor.and_then(|axis| chart.axes.get(&axis)).cloned();
    let by_label: HashMap<&str, &AxisStyle> = chart
        .traces
        .iter()
        .filter_map(|tr| chart.axes.get(&tr.axis).map(|style| (tr.label.as_str(), style)))
        .collect();

    let plot = Plot::new("dashboard_plot")
        .height(height)
        .allow_scroll(false)
        .legend(Legend::default())
        .x_axis_formatter(|x, _range| {
            let secs = x.value as i64;
            chrono::DateTime::from_timestamp(secs, 0)
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .y_axis_formatter(move |y, _range| match &anchor_style {
            Some(style) => format_tick(style.transform.unmap(y.value), &style.format),
            None => format!("{:.0}", y.value),
        })
        .label_formatter(|name, point| {
            let date = chrono::DateTime::from_timestamp(point.x as i64, 0)
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            match by_label.get(name) {
                Some(style) => format!(
                    "{name}\n{date}: {}",
                    format_tick(style.transform.unmap(point.y), &style.format)
                ),
                None => format!("{name}\n{date}"),
            }
        });

    plot.show(ui, |plot_ui| {
        for trace in &chart.traces {
            if trace.plot_points.is_empty() {
                continue;
            }
            plot_ui.line(Line::new(&trace.label, trace.plot_points.clone()));
        }
    });
}

/// One line per non-anchor axis in use, showing its own value range in its
/// own tick format, since only the anchor axis owns the tick labels.
fn axis_strip(ui: &mut egui::Ui, chart: &ChartSpec) {
    let mut parts = Vec::new();
    for (axis, style) in &chart.axes {
        if Some(*axis) == chart.anchor {
            continue;
        }
        let mut range: Option<(f64, f64)> = None;
        for trace in chart.traces.iter().filter(|t| t.axis == *axis) {
            for p in &trace.points {
                let r = range.get_or_insert((p[1], p[1]));
                r.0 = r.0.min(p[1]);
                r.1 = r.1.max(p[1]);
            }
        }
        if let Some((lo, hi)) = range {
            let suffix = axis.label_suffix().unwrap_or_default();
            parts.push(format!(
                "{suffix} {} \u{2013} {}",
                format_tick(lo, &style.format),
                format_tick(hi, &style.format)
            ));
        }
    }
    if !parts.is_empty() {
        ui.label(egui::RichText::new(parts.join("   ")).weak());
    }
}
