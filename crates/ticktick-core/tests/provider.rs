// File: crates/ticktick-core/tests/provider.rs
// Purpose: File-backed provider: CSV header detection, row skipping/sorting, metadata loading, unknown tickers.

use std::path::PathBuf;

use chrono::NaiveDate;
use ticktick_core::provider::load_history_csv;
use ticktick_core::{DateRange, FileProvider, MarketData, MarketDataError, Ticker};

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/test_out/provider").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn parses_exported_history_with_timezone_suffix() {
    let dir = out_dir("tz");
    let csv = "Date,Open,High,Low,Close,Volume,Dividends,Stock Splits\n\
               2024-01-03 00:00:00-05:00,184.2,185.9,183.4,184.25,58414500,0.0,0.0\n\
               2024-01-02 00:00:00-05:00,187.1,188.4,183.9,185.64,82488700,0.0,0.0\n\
               2024-01-04 00:00:00-05:00,182.2,183.1,180.9,,71983600,0.0,0.0\n";
    let path = dir.join("AAPL.csv");
    std::fs::write(&path, csv).unwrap();

    let s = load_history_csv(&path).unwrap();
    assert_eq!(s.len(), 2, "row without close is skipped");
    assert_eq!(s.points()[0].date, d(2024, 1, 2));
    assert_eq!(s.points()[0].close, 185.64);
    assert_eq!(s.points()[0].high, Some(188.4));
    assert_eq!(s.points()[1].volume, Some(58_414_500));
}

#[test]
fn accepts_epoch_and_close_only_files() {
    let dir = out_dir("epoch");
    // 2023-11-14 and 2023-11-15 (UTC), second one in milliseconds
    let csv = "timestamp,close\n1699920000,10.5\n1700006400000,11.0\n";
    let path = dir.join("X.csv");
    std::fs::write(&path, csv).unwrap();

    let s = load_history_csv(&path).unwrap();
    assert_eq!(s.closes().collect::<Vec<_>>(), vec![10.5, 11.0]);
    assert_eq!(s.points()[0].date, d(2023, 11, 14));
    assert_eq!(s.points()[0].open, None);
}

#[test]
fn ragged_rows_are_skipped_and_volume_is_integral() {
    let dir = out_dir("ragged");
    let csv = "date,open,high,low,close,volume\n\
               2024-03-01,10,11,9,10.5,1200\n\
               2024-03-04,10.5\n\
               2024-03-05,10,11,9,10.8,1300.5,extra\n\
               2024-03-06,10,11,9,11.2,18446744073709551616\n";
    let path = dir.join("RAG.csv");
    std::fs::write(&path, csv).unwrap();

    let s = load_history_csv(&path).unwrap();
    assert_eq!(s.closes().collect::<Vec<_>>(), vec![10.5, 10.8, 11.2], "short row skipped, long row kept");
    assert_eq!(s.points()[0].volume, Some(1200));
    assert_eq!(s.points()[1].volume, None, "fractional volume is not truncated");
    assert_eq!(s.points()[2].volume, None, "out-of-range volume is not saturated");
}

#[test]
fn missing_close_column_is_malformed() {
    let dir = out_dir("noclose");
    let path = dir.join("BAD.csv");
    std::fs::write(&path, "date,open\n2024-01-01,1.0\n").unwrap();
    assert!(matches!(load_history_csv(&path), Err(MarketDataError::Malformed(_))));
}

#[test]
fn provider_reads_history_range_and_info() {
    let dir = out_dir("full");
    std::fs::write(
        dir.join("MSFT.csv"),
        "date,close\n2024-02-01,400.0\n2024-02-02,405.0\n2024-02-05,410.0\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("MSFT.json"),
        r#"{"shortName":"Microsoft Corporation","currentPrice":410.0,"previousClose":405.0}"#,
    )
    .unwrap();

    let p = FileProvider::new(&dir);
    let t = Ticker::parse("msft").unwrap();
    assert_eq!(p.history(&t, DateRange::Max).unwrap().len(), 3);
    let ranged = p.history(&t, DateRange::between(Some(d(2024, 2, 2)), None)).unwrap();
    assert_eq!(ranged.len(), 2);

    let info = p.info(&t).unwrap();
    assert_eq!(info.display_name(), Some("Microsoft Corporation"));
    assert_eq!(info.previous_close, Some(405.0));
}

#[test]
fn info_defaults_when_only_history_exists() {
    let dir = out_dir("noinfo");
    std::fs::write(dir.join("NOINFO.csv"), "date,close\n2024-01-01,1.0\n").unwrap();
    let p = FileProvider::new(&dir);
    let info = p.info(&Ticker::parse("NOINFO").unwrap()).unwrap();
    assert_eq!(info, Default::default());
}

#[test]
fn unknown_ticker() {
    let p = FileProvider::new(out_dir("empty"));
    let t = Ticker::parse("ZZZZ").unwrap();
    assert!(matches!(p.history(&t, DateRange::Max), Err(MarketDataError::UnknownTicker(_))));
    assert!(matches!(p.info(&t), Err(MarketDataError::UnknownTicker(_))));
}
