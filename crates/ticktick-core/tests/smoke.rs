// File: crates/ticktick-core/tests/smoke.rs
// Purpose: End-to-end price chart render writing a PNG, plus in-memory bytes decoded back to pixels.

use chrono::NaiveDate;
use ticktick_core::{enrich, Chart, PriceSeries, RenderOptions, Theme};

fn build_chart(n: usize) -> Chart {
    let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.05).sin() * 8.0 + i as f64 * 0.02).collect();
    let series = PriceSeries::from_closes(NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(), &closes);
    let points = enrich(&series, 100).expect("enrich");
    Chart::price_chart("Smoke (SMK)", &points, 100)
}

#[test]
fn render_smoke_png() {
    let chart = build_chart(400);
    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");

    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn decoded_png_matches_requested_size_and_background() {
    let chart = build_chart(3000);
    let opts = RenderOptions { width: 640, height: 360, theme: Theme::light(), draw_labels: false, ..RenderOptions::default() };
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");

    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(img.dimensions(), (640, 360));
    // top-left corner is outside the plot area: pure background
    let px = img.get_pixel(0, 0).0;
    assert_eq!(px, [250, 250, 252, 255]);
}

#[test]
fn zero_sized_surface_is_an_error() {
    let chart = build_chart(10);
    let opts = RenderOptions { width: 0, ..RenderOptions::default() };
    assert!(chart.render_to_png_bytes(&opts).is_err());
}
