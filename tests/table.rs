use chrono::NaiveDate;
use quadplot::data::loader::load_csv;
use quadplot::data::table::{epoch_seconds, WideTable};
use quadplot::session::FilterState;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_wide() -> WideTable {
    let csv = "\
Date,Petrol Price,Diesel Price,VAT%
2023-11-01,22.5,21.1,15
2023-12-01,23.0,21.4,15
2024-01-01,23.8,21.9,15
";
    load_csv(csv.as_bytes()).unwrap()
}

#[test]
fn melt_produces_one_row_per_date_series_pair() {
    let long = sample_wide().melt();
    assert_eq!(long.rows.len(), 9);
    assert_eq!(
        long.series_names,
        vec![
            "Petrol Price".to_string(),
            "Diesel Price".to_string(),
            "VAT%".to_string()
        ]
    );
    // First row is the first date's first column.
    assert_eq!(long.rows[0].series, "Petrol Price");
    assert_eq!(long.rows[0].date, d(2023, 11, 1));
    assert_eq!(long.rows[0].value, 22.5);
}

#[test]
fn filter_by_selection_and_inclusive_range() {
    let long = sample_wide().melt();
    let filtered = long.filter(
        &["Petrol Price".to_string()],
        d(2023, 12, 1),
        d(2024, 1, 1),
    );
    let got: Vec<f64> = filtered.rows.iter().map(|r| r.value).collect();
    assert_eq!(got, vec![23.0, 23.8]);
}

#[test]
fn points_are_epoch_seconds_in_date_order() {
    let long = sample_wide().melt();
    let pts = long.points("VAT%");
    assert_eq!(pts.len(), 3);
    assert_eq!(pts[0], [epoch_seconds(d(2023, 11, 1)), 15.0]);
    assert!(pts[0][0] < pts[1][0] && pts[1][0] < pts[2][0]);
}

#[test]
fn date_range_spans_the_table() {
    let long = sample_wide().melt();
    assert_eq!(long.date_range(), Some((d(2023, 11, 1), d(2024, 1, 1))));
}

#[test]
fn filter_state_defaults_then_narrow() {
    let long = sample_wide().melt();
    let mut filters = FilterState::for_table(&long);
    assert_eq!(filters.selected.len(), 3);

    filters.toggle_selected(&long, "Diesel Price");
    filters.start = d(2024, 1, 1);
    let filtered = filters.apply(&long);
    assert_eq!(filtered.rows.len(), 2);
    assert!(filtered.rows.iter().all(|r| r.series != "Diesel Price"));
    assert!(filtered.rows.iter().all(|r| r.date == d(2024, 1, 1)));
}

#[test]
fn filter_state_revalidates_against_smaller_workbook() {
    let long = sample_wide().melt();
    let mut filters = FilterState::for_table(&long);
    filters.overrides.secondary.push("VAT%".to_string());

    // Same workbook minus the VAT% column, as if the file was re-saved.
    let csv = "Date,Petrol Price,Diesel Price\n2023-11-01,22.5,21.1\n";
    let smaller = load_csv(csv.as_bytes()).unwrap().melt();
    filters.revalidate(&smaller);

    assert_eq!(filters.selected.len(), 2);
    assert!(filters.overrides.secondary.is_empty());
    assert_eq!(filters.start, d(2023, 11, 1));
    assert_eq!(filters.end, d(2023, 11, 1));
}
