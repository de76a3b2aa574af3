//! Axis assignment: which y-axis each selected series is drawn on, and how
//! each axis formats its tick labels.
//!
//! The main entry point is [`assign_axes`], a pure function of the selected
//! series names and the three override lists. It is called on every frame the
//! filters change; re-running it with identical inputs yields identical output.

use std::collections::BTreeMap;

// ─────────────────────────────────────────────────────────────────────────────
// AxisId
// ─────────────────────────────────────────────────────────────────────────────

/// One of the four y-axes a series can be drawn on.
///
/// `Primary` is the default left axis; the other three are opt-in via the
/// sidebar override lists. When a series appears in more than one override
/// list, the highest-priority axis wins: `Quaternary` beats `Tertiary` beats
/// `Secondary`. This resolution order is part of the API contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AxisId {
    /// Default left axis.
    Primary,
    /// Right axis ("RHS" in the sidebar).
    Secondary,
    /// Second left axis.
    Tertiary,
    /// Second right axis.
    Quaternary,
}

impl AxisId {
    /// All axes, primary first.
    pub const ALL: [AxisId; 4] = [
        AxisId::Primary,
        AxisId::Secondary,
        AxisId::Tertiary,
        AxisId::Quaternary,
    ];

    /// Legend suffix appended to a series name drawn on this axis.
    ///
    /// ```
    /// # use quadplot::axes::AxisId;
    /// assert_eq!(AxisId::Primary.label_suffix(), None);
    /// assert_eq!(AxisId::Secondary.label_suffix(), Some("(RHS)"));
    /// ```
    pub fn label_suffix(&self) -> Option<&'static str> {
        match self {
            AxisId::Primary => None,
            AxisId::Secondary => Some("(RHS)"),
            AxisId::Tertiary => Some("(3rd)"),
            AxisId::Quaternary => Some("(4th)"),
        }
    }

    /// Whether this axis renders on the right-hand side of the plot.
    pub fn right_side(&self) -> bool {
        matches!(self, AxisId::Secondary | AxisId::Quaternary)
    }
}

impl std::fmt::Display for AxisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisId::Primary => write!(f, "primary"),
            AxisId::Secondary => write!(f, "secondary"),
            AxisId::Tertiary => write!(f, "tertiary"),
            AxisId::Quaternary => write!(f, "quaternary"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ValueKind
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a series carries percentage values or currency (rand) values.
///
/// Decided purely from the series name and used only to pick tick formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Percent,
    Currency,
}

impl ValueKind {
    /// Classify a series by name: anything containing `%` or the
    /// case-insensitive substring `rate` is a percentage series.
    ///
    /// ```
    /// # use quadplot::axes::ValueKind;
    /// assert_eq!(ValueKind::classify("VAT%"), ValueKind::Percent);
    /// assert_eq!(ValueKind::classify("Fuel Rate"), ValueKind::Percent);
    /// assert_eq!(ValueKind::classify("Petrol Price"), ValueKind::Currency);
    /// ```
    pub fn classify(name: &str) -> ValueKind {
        if name.contains('%') || name.to_lowercase().contains("rate") {
            ValueKind::Percent
        } else {
            ValueKind::Currency
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AxisFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tick formatting shared by every series on one axis.
///
/// `tick_format` is a d3-style format spec (`",.0%"` or `",.0f"`) kept as the
/// contract toward the rendering layer; `tick_prefix` is prepended verbatim to
/// every tick label. The mixed-kind fallback keeps a trailing space in the
/// prefix to flag the ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisFormat {
    pub tick_format: &'static str,
    pub tick_prefix: &'static str,
}

impl AxisFormat {
    pub const PERCENT: AxisFormat = AxisFormat {
        tick_format: ",.0%",
        tick_prefix: "",
    };
    pub const CURRENCY: AxisFormat = AxisFormat {
        tick_format: ",.0f",
        tick_prefix: "R",
    };
    /// Fallback for an axis mixing percent and currency series.
    pub const MIXED: AxisFormat = AxisFormat {
        tick_format: ",.0f",
        tick_prefix: "R ",
    };

    /// Aggregate the formats of all series on one axis.
    fn aggregate(kinds: &[ValueKind]) -> AxisFormat {
        if kinds.iter().all(|k| *k == ValueKind::Percent) {
            AxisFormat::PERCENT
        } else if kinds.iter().all(|k| *k == ValueKind::Currency) {
            AxisFormat::CURRENCY
        } else {
            AxisFormat::MIXED
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Assignment
// ─────────────────────────────────────────────────────────────────────────────

/// The three sidebar override lists. Each is expected to be a subset of the
/// selected series; unknown names are simply never matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisOverrides {
    pub secondary: Vec<String>,
    pub tertiary: Vec<String>,
    pub quaternary: Vec<String>,
}

impl AxisOverrides {
    /// Resolve the axis for one series name. Checked from the highest-priority
    /// list down, so an overlapping name lands on the quaternary axis first.
    pub fn resolve(&self, name: &str) -> AxisId {
        if self.quaternary.iter().any(|s| s == name) {
            AxisId::Quaternary
        } else if self.tertiary.iter().any(|s| s == name) {
            AxisId::Tertiary
        } else if self.secondary.iter().any(|s| s == name) {
            AxisId::Secondary
        } else {
            AxisId::Primary
        }
    }

    /// Drop entries that are no longer in `selected` (filters changed).
    pub fn retain_selected(&mut self, selected: &[String]) {
        self.secondary.retain(|s| selected.contains(s));
        self.tertiary.retain(|s| selected.contains(s));
        self.quaternary.retain(|s| selected.contains(s));
    }
}

/// One selected series with its resolved axis and legend label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesAxis {
    pub series: String,
    pub axis: AxisId,
    /// Bare name on the primary axis, otherwise `"<name> (RHS|3rd|4th)"`.
    pub display_label: String,
}

/// Full result of [`assign_axes`]: per-series assignments in selection order,
/// and one format per axis that has at least one series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisLayout {
    pub assignments: Vec<SeriesAxis>,
    pub formats: BTreeMap<AxisId, AxisFormat>,
}

impl AxisLayout {
    /// The axes in use, primary first.
    pub fn axes_in_use(&self) -> impl Iterator<Item = AxisId> + '_ {
        self.formats.keys().copied()
    }

    /// Series names assigned to `axis`, in selection order.
    pub fn series_on(&self, axis: AxisId) -> impl Iterator<Item = &str> {
        self.assignments
            .iter()
            .filter(move |a| a.axis == axis)
            .map(|a| a.series.as_str())
    }
}

/// Assign every selected series to an axis and derive per-axis tick formats.
///
/// Pure and total: any list of names is valid input, an empty selection gives
/// an empty layout, and axes with no series produce no format entry.
pub fn assign_axes(selected: &[String], overrides: &AxisOverrides) -> AxisLayout {
    let mut assignments = Vec::with_capacity(selected.len());
    let mut kinds_by_axis: BTreeMap<AxisId, Vec<ValueKind>> = BTreeMap::new();

    for name in selected {
        let axis = overrides.resolve(name);
        let display_label = match axis.label_suffix() {
            None => name.clone(),
            Some(suffix) => format!("{name} {suffix}"),
        };
        kinds_by_axis
            .entry(axis)
            .or_default()
            .push(ValueKind::classify(name));
        assignments.push(SeriesAxis {
            series: name.clone(),
            axis,
            display_label,
        });
    }

    let formats = kinds_by_axis
        .into_iter()
        .map(|(axis, kinds)| (axis, AxisFormat::aggregate(&kinds)))
        .collect();

    AxisLayout {
        assignments,
        formats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_case_insensitive_for_rate() {
        assert_eq!(ValueKind::classify("Prime RATE"), ValueKind::Percent);
        assert_eq!(ValueKind::classify("pirate gold"), ValueKind::Percent);
        assert_eq!(ValueKind::classify("Diesel"), ValueKind::Currency);
    }

    #[test]
    fn overlap_resolves_to_quaternary() {
        let overrides = AxisOverrides {
            secondary: vec!["A".into()],
            tertiary: vec![],
            quaternary: vec!["A".into()],
        };
        assert_eq!(overrides.resolve("A"), AxisId::Quaternary);
    }

    #[test]
    fn retain_selected_prunes_stale_overrides() {
        let mut overrides = AxisOverrides {
            secondary: vec!["A".into(), "B".into()],
            tertiary: vec!["B".into()],
            quaternary: vec![],
        };
        overrides.retain_selected(&["A".into()]);
        assert_eq!(overrides.secondary, vec!["A".to_string()]);
        assert!(overrides.tertiary.is_empty());
    }
}
