//! Chart construction: turn a filtered table plus an [`AxisLayout`] into a
//! renderer-agnostic [`ChartSpec`].
//!
//! egui_plot draws everything in a single y coordinate space, so each
//! non-primary axis group is mapped into the primary group's value range by an
//! affine [`AxisTransform`]. Tick labels and hover readouts go back through
//! the inverse transform and are rendered with [`format_tick`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::axes::{AxisFormat, AxisId, AxisLayout};
use crate::data::table::SeriesTable;

// ─────────────────────────────────────────────────────────────────────────────
// AxisTransform
// ─────────────────────────────────────────────────────────────────────────────

/// Affine map from an axis's value space into plot (primary) space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    scale: f64,
    offset: f64,
}

impl AxisTransform {
    pub const IDENTITY: AxisTransform = AxisTransform {
        scale: 1.0,
        offset: 0.0,
    };

    /// Map `from` onto `to` so the ranges' endpoints coincide. Degenerate
    /// source ranges fall back to a pure translation onto the target center.
    fn between(from: (f64, f64), to: (f64, f64)) -> AxisTransform {
        let from_span = from.1 - from.0;
        let to_span = to.1 - to.0;
        if from_span.abs() < f64::EPSILON {
            return AxisTransform {
                scale: 1.0,
                offset: (to.0 + to.1) / 2.0 - from.0,
            };
        }
        let scale = if to_span.abs() < f64::EPSILON {
            1.0
        } else {
            to_span / from_span
        };
        AxisTransform {
            scale,
            offset: to.0 - from.0 * scale,
        }
    }

    /// Axis value → plot y.
    pub fn map(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    /// Plot y → axis value.
    pub fn unmap(&self, plot_y: f64) -> f64 {
        (plot_y - self.offset) / self.scale
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ChartSpec
// ─────────────────────────────────────────────────────────────────────────────

/// One plotted series: raw points plus the same points mapped into plot space.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTrace {
    pub series: String,
    pub axis: AxisId,
    /// Legend label, already carrying the axis suffix.
    pub label: String,
    /// `[epoch seconds, value]` in the axis's own units.
    pub points: Vec<[f64; 2]>,
    /// `points` mapped through the axis transform for drawing.
    pub plot_points: Vec<[f64; 2]>,
}

/// Tick style and transform for one axis in use.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStyle {
    pub format: AxisFormat,
    pub transform: AxisTransform,
}

/// Everything the plot view needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub traces: Vec<ChartTrace>,
    pub axes: BTreeMap<AxisId, AxisStyle>,
    /// The axis whose values plot space is expressed in. Its transform is the
    /// identity and its format owns the y tick labels. `None` when nothing is
    /// drawn.
    pub anchor: Option<AxisId>,
}

/// Build the chart for the current filters.
///
/// `filtered` is the date/series-filtered table; `layout` the axis assignment
/// for the same selection. Series with no rows in range still appear in the
/// legend with an empty line.
pub fn build_chart(filtered: &SeriesTable, layout: &AxisLayout) -> ChartSpec {
    // Value range per axis, over the series assigned to it.
    let mut ranges: BTreeMap<AxisId, (f64, f64)> = BTreeMap::new();
    let mut traces = Vec::with_capacity(layout.assignments.len());
    for assignment in &layout.assignments {
        let points = filtered.points(&assignment.series);
        if let Some(range) = value_range(&points) {
            ranges
                .entry(assignment.axis)
                .and_modify(|r| {
                    r.0 = r.0.min(range.0);
                    r.1 = r.1.max(range.1);
                })
                .or_insert(range);
        }
        traces.push(ChartTrace {
            series: assignment.series.clone(),
            axis: assignment.axis,
            label: assignment.display_label.clone(),
            points,
            plot_points: Vec::new(),
        });
    }

    // The lowest axis that actually has rows in range anchors plot space;
    // usually primary. Every other axis is stretched onto its range. An axis
    // in use with no data cannot anchor, it has no range to stretch onto.
    let anchor_axis = ranges
        .keys()
        .next()
        .copied()
        .or_else(|| layout.formats.keys().next().copied());
    let anchor = ranges.values().next().copied();
    let mut axes = BTreeMap::new();
    for (axis, format) in &layout.formats {
        let transform = match (ranges.get(axis), anchor) {
            (Some(range), Some(anchor)) if *range != anchor => {
                AxisTransform::between(*range, anchor)
            }
            _ => AxisTransform::IDENTITY,
        };
        axes.insert(
            *axis,
            AxisStyle {
                format: *format,
                transform,
            },
        );
    }

    for trace in &mut traces {
        let transform = axes
            .get(&trace.axis)
            .map(|style| style.transform)
            .unwrap_or(AxisTransform::IDENTITY);
        trace.plot_points = trace
            .points
            .iter()
            .map(|p| [p[0], transform.map(p[1])])
            .collect();
    }

    let selected: Vec<String> = layout
        .assignments
        .iter()
        .map(|a| a.series.clone())
        .collect();
    ChartSpec {
        title: chart_title(&selected, filtered.date_range()),
        traces,
        axes,
        anchor: anchor_axis,
    }
}

fn value_range(points: &[[f64; 2]]) -> Option<(f64, f64)> {
    let first = points.first()?[1];
    let mut range = (first, first);
    for p in points {
        range.0 = range.0.min(p[1]);
        range.1 = range.1.max(p[1]);
    }
    Some(range)
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting
// ─────────────────────────────────────────────────────────────────────────────

/// Render one tick value with an axis's format and prefix.
///
/// The two formats carried by [`AxisFormat`] follow d3 semantics: `",.0%"`
/// multiplies by 100, rounds to integer, groups thousands and appends `%`;
/// `",.0f"` rounds to integer with thousands grouping. The prefix goes in
/// front verbatim, including the trailing space of the mixed-axis `"R "`.
pub fn format_tick(value: f64, format: &AxisFormat) -> String {
    let rendered = match format.tick_format {
        ",.0%" => format!("{}%", group_thousands(value * 100.0)),
        _ => group_thousands(value),
    };
    format!("{}{}", format.tick_prefix, rendered)
}

/// Round to integer and insert comma thousands separators.
fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as i64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Chart title: selected names joined with `" vs "`, plus a year-range suffix
/// when the filtered data is non-empty.
pub fn chart_title(selected: &[String], range: Option<(NaiveDate, NaiveDate)>) -> String {
    let joined = selected.join(" vs ");
    match range {
        Some((start, end)) if start.year() == end.year() => {
            format!("{joined} ({})", start.year())
        }
        Some((start, end)) => format!("{joined} ({}\u{2013}{})", start.year(), end.year()),
        None => joined,
    }
}
