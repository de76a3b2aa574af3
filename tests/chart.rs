use chrono::NaiveDate;
use quadplot::axes::{assign_axes, AxisFormat, AxisId, AxisOverrides};
use quadplot::chart::{build_chart, chart_title, format_tick};
use quadplot::data::loader::load_csv;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn percent_ticks_multiply_and_append_percent_sign() {
    assert_eq!(format_tick(0.15, &AxisFormat::PERCENT), "15%");
    assert_eq!(format_tick(1.0, &AxisFormat::PERCENT), "100%");
    assert_eq!(format_tick(12.345, &AxisFormat::PERCENT), "1,235%");
}

#[test]
fn currency_ticks_carry_the_rand_prefix() {
    assert_eq!(format_tick(23.4, &AxisFormat::CURRENCY), "R23");
    assert_eq!(format_tick(1250000.0, &AxisFormat::CURRENCY), "R1,250,000");
}

#[test]
fn mixed_ticks_keep_the_trailing_space_in_the_prefix() {
    assert_eq!(format_tick(23.4, &AxisFormat::MIXED), "R 23");
}

#[test]
fn title_joins_with_vs_and_year_range() {
    let selected = names(&["Petrol Price", "VAT%"]);
    assert_eq!(chart_title(&selected, None), "Petrol Price vs VAT%");
    assert_eq!(
        chart_title(&selected, Some((d(2023, 11, 1), d(2024, 1, 1)))),
        "Petrol Price vs VAT% (2023\u{2013}2024)"
    );
    assert_eq!(
        chart_title(&selected, Some((d(2024, 1, 1), d(2024, 6, 1)))),
        "Petrol Price vs VAT% (2024)"
    );
    assert_eq!(chart_title(&[], None), "");
}

#[test]
fn chart_maps_secondary_axis_into_primary_space() {
    let csv = "\
Date,Petrol Price,VAT%
2024-01-01,20,0.10
2024-02-01,30,0.20
";
    let table = load_csv(csv.as_bytes()).unwrap().melt();
    let overrides = AxisOverrides {
        secondary: names(&["VAT%"]),
        tertiary: vec![],
        quaternary: vec![],
    };
    let selected = names(&["Petrol Price", "VAT%"]);
    let layout = assign_axes(&selected, &overrides);
    let chart = build_chart(&table, &layout);

    // Primary trace is untouched.
    let petrol = &chart.traces[0];
    assert_eq!(petrol.points, petrol.plot_points);

    // Secondary trace spans the primary range after mapping.
    let vat = &chart.traces[1];
    assert_eq!(vat.label, "VAT% (RHS)");
    assert!((vat.plot_points[0][1] - 20.0).abs() < 1e-9);
    assert!((vat.plot_points[1][1] - 30.0).abs() < 1e-9);

    // Inverse transform recovers the raw values for tick labels.
    let style = &chart.axes[&AxisId::Secondary];
    assert!((style.transform.unmap(vat.plot_points[0][1]) - 0.10).abs() < 1e-9);
    assert_eq!(style.format, AxisFormat::PERCENT);
}

#[test]
fn anchor_is_the_lowest_axis_with_data() {
    // Column A parses to gaps only, so the primary axis is in use (it gets a
    // format entry) but has no rows; the secondary axis must anchor plot
    // space and own the tick labels.
    let csv = "\
Date,Fuel Levy,Diesel Price
2024-01-01,,5
2024-02-01,,7
";
    let table = load_csv(csv.as_bytes()).unwrap().melt();
    let overrides = AxisOverrides {
        secondary: names(&["Diesel Price"]),
        tertiary: vec![],
        quaternary: vec![],
    };
    let layout = assign_axes(&names(&["Fuel Levy", "Diesel Price"]), &overrides);
    let chart = build_chart(&table, &layout);

    assert!(chart.axes.contains_key(&AxisId::Primary));
    assert_eq!(chart.anchor, Some(AxisId::Secondary));
    // The anchoring axis draws untransformed.
    let diesel = &chart.traces[1];
    assert_eq!(diesel.points, diesel.plot_points);
}

#[test]
fn anchor_is_primary_when_it_has_data() {
    let csv = "Date,A,B\n2024-01-01,1,2\n";
    let table = load_csv(csv.as_bytes()).unwrap().melt();
    let overrides = AxisOverrides {
        secondary: names(&["B"]),
        tertiary: vec![],
        quaternary: vec![],
    };
    let layout = assign_axes(&names(&["A", "B"]), &overrides);
    assert_eq!(build_chart(&table, &layout).anchor, Some(AxisId::Primary));
}

#[test]
fn chart_title_reflects_filtered_years() {
    let csv = "Date,A\n2023-06-01,1\n2024-06-01,2\n";
    let table = load_csv(csv.as_bytes()).unwrap().melt();
    let layout = assign_axes(&names(&["A"]), &AxisOverrides::default());
    let chart = build_chart(&table, &layout);
    assert_eq!(chart.title, "A (2023\u{2013}2024)");
}

#[test]
fn empty_selection_builds_an_empty_chart() {
    let csv = "Date,A\n2024-01-01,1\n";
    let table = load_csv(csv.as_bytes()).unwrap().melt();
    let layout = assign_axes(&[], &AxisOverrides::default());
    let filtered = table.filter(&[], d(2024, 1, 1), d(2024, 1, 1));
    let chart = build_chart(&filtered, &layout);
    assert!(chart.traces.is_empty());
    assert!(chart.axes.is_empty());
    assert_eq!(chart.anchor, None);
    assert_eq!(chart.title, "");
}
