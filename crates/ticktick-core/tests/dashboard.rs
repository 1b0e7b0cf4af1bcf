// File: crates/ticktick-core/tests/dashboard.rs
// Purpose: Full query flow and the upstream-vs-computation error split.

use std::path::PathBuf;

use ticktick_core::{Dashboard, DashboardError, DateRange, EnrichError, FileProvider, MarketDataError, RenderOptions};

fn data_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/test_out/dashboard").join(name);
    std::fs::create_dir_all(&dir).unwrap();

    let mut csv = String::from("Date,Open,High,Low,Close,Volume\n");
    let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    for (i, day) in start.iter_days().take(150).enumerate() {
        let c = 50.0 + i as f64 * 0.1;
        csv.push_str(&format!("{day},{o},{h},{l},{c},{v}\n", o = c - 0.2, h = c + 0.5, l = c - 0.5, v = 1000 + i));
    }
    std::fs::write(dir.join("DASH.csv"), csv).unwrap();
    std::fs::write(
        dir.join("DASH.json"),
        r#"{"shortName":"Dash Corp","currentPrice":64.9,"previousClose":64.8,"dayHigh":65.4,"dayLow":64.4}"#,
    )
    .unwrap();
    std::fs::write(dir.join("EMPTY.csv"), "Date,Close\n").unwrap();
    dir
}

#[test]
fn query_builds_full_view() {
    let dash = Dashboard::new(FileProvider::new(data_dir("full")));
    let view = dash.query("dash", DateRange::Max).expect("query");

    assert_eq!(view.ticker.as_str(), "DASH");
    assert_eq!(view.window, 100);
    assert_eq!(view.points.len(), 150);
    assert!(view.points[98].moving_average.is_none());
    assert!(view.points[99].moving_average.is_some());
    assert_eq!(view.metrics[0].label, "Dash Corp");
    assert_eq!(view.metrics[0].delta.as_deref(), Some("+0.10"));
    assert_eq!(view.chart.title.as_deref(), Some("Dash Corp (DASH)"));
    assert_eq!(view.chart.series.len(), 2);

    let png = view.chart_png(&RenderOptions { draw_labels: false, ..RenderOptions::default() }).unwrap();
    let html = view.report_html(Some(&png));
    assert!(html.contains("100-day moving average"));
}

#[test]
fn custom_window_and_range() {
    let dash = Dashboard::new(FileProvider::new(data_dir("range"))).with_window(5);
    let from = chrono::NaiveDate::from_ymd_opt(2023, 5, 1);
    let view = dash.query("DASH", DateRange::between(from, None)).unwrap();
    assert!(view.points.len() < 150);
    assert!(view.points[4].moving_average.is_some());
    assert_eq!(view.points[0].date, from.unwrap());
}

#[test]
fn upstream_failures_are_distinguished() {
    let dash = Dashboard::new(FileProvider::new(data_dir("upstream")));

    let err = dash.query("not a ticker", DateRange::Max).err().unwrap();
    assert!(matches!(err, DashboardError::Upstream(MarketDataError::InvalidTicker(_))));

    let err = dash.query("NOPE", DateRange::Max).err().unwrap();
    assert!(matches!(err, DashboardError::Upstream(MarketDataError::UnknownTicker(_))));
    assert!(err.is_upstream());

    let err = dash.query("EMPTY", DateRange::Max).err().unwrap();
    assert!(matches!(err, DashboardError::Upstream(MarketDataError::NoData(_))));
}

#[test]
fn zero_window_is_a_computation_error() {
    let dash = Dashboard::new(FileProvider::new(data_dir("window"))).with_window(0);
    let err = dash.query("DASH", DateRange::Max).err().unwrap();
    assert!(matches!(err, DashboardError::Enrichment(EnrichError::InvalidInput(_))));
    assert!(!err.is_upstream());
}
